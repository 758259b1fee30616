pub(crate) mod ensure_success;
