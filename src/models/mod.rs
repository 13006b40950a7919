pub mod loaders;
pub mod member;
pub mod work_config;
pub mod work_reference;

pub use loaders::{load_work_config, load_work_configs};
pub use member::{MemberKind, MemberName, MAIN_MEMBER, TEMPLATE_SNAPSHOT, TEMPLATE_WORK_MEMBER};
pub use work_config::WorkConfig;
pub use work_reference::WorkReference;
