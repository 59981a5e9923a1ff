use super::*;

fn installed_family_count() -> usize {
    Collection::new(CollectionOptions {
        shared: false,
        system_fonts: true,
    })
    .family_names()
    .count()
}

#[test]
fn missing_configured_font_is_a_font_error() {
    let err = load_font(Some(Path::new("does/not/exist.ttf"))).unwrap_err();
    assert!(err.to_string().contains("font error:"));
}

#[test]
fn configured_path_is_the_source() {
    let dir = std::path::PathBuf::from("target").join("font_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("fake.ttf");
    std::fs::write(&path, b"0123").unwrap();

    let face = load_font(Some(&path)).unwrap();
    assert_eq!(face.source(), path.display().to_string());
    assert_eq!(face.bytes(), b"0123");
    assert_eq!(face.index(), 0);
}

#[test]
fn resolves_system_font_without_a_path() {
    let face = match load_font(None) {
        Ok(face) => face,
        Err(e) => {
            assert_eq!(installed_family_count(), 0, "fonts installed but lookup failed: {e}");
            return;
        }
    };
    assert!(!face.bytes().is_empty());
    assert!(!face.source().is_empty());

    // The chosen face is at least as heavy as every upright face of its family up to 900.
    let mut registry = Collection::new(CollectionOptions {
        shared: false,
        system_fonts: false,
    });
    let families = registry.register_fonts(face.blob().clone(), None);
    let info = families
        .iter()
        .flat_map(|(_, fonts)| fonts.iter())
        .find(|f| f.index() == face.index())
        .cloned()
        .unwrap();
    let family_name = registry.family_name(families[0].0).unwrap().to_owned();

    let mut system = Collection::new(CollectionOptions {
        shared: false,
        system_fonts: true,
    });
    if let Some(family) = system.family_by_name(&family_name) {
        let heaviest = family
            .fonts()
            .iter()
            .filter(|f| f.style() == FontStyle::Normal)
            .map(|f| f.weight().value().min(900.0))
            .fold(0.0f32, f32::max);
        assert!(
            info.weight().value() >= heaviest,
            "picked {} but {family_name} has {heaviest}",
            info.weight().value()
        );
    }
}
