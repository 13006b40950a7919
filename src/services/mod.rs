pub mod json_editor;
pub mod work_templater;

pub use json_editor::{deep_copy, read_json, to_json, write_json, Document, JsonObjectExt};
pub use work_templater::apply_work_config;
