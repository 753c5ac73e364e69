pub(crate) mod builder;
pub(crate) mod clock;
pub(crate) mod master;
pub(crate) mod regions;
pub(crate) mod scene;
