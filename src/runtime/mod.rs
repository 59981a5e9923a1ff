pub(crate) mod cancel;
pub(crate) mod driver;
pub(crate) mod effect;
pub(crate) mod host;
