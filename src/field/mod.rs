pub(crate) mod ambient;
pub(crate) mod links;
pub(crate) mod particle;
pub(crate) mod regime;
pub(crate) mod text;
