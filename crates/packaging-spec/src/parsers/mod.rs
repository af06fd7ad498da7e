pub(crate) mod requirement;
