pub(crate) mod actions;
pub(crate) mod common;
pub(crate) mod components;
pub(crate) mod criteria;
pub(crate) mod document;
pub(crate) mod graph;
pub(crate) mod parameters;
pub(crate) mod step;
pub(crate) mod workflow;
