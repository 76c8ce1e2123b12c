pub(crate) mod controller;
pub(crate) mod drag;
pub(crate) mod window;
