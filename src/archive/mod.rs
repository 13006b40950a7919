//! 归档层
//!
//! - `extractor` - 解压 .d3w，按命名规则列出数据成员
//! - `builder` - 把数据成员重新打包成 .d3w

pub mod builder;
pub mod extractor;

pub use builder::{build, ensure_parent_dir};
pub use extractor::{extract, extract_to_temp, list_data_members, DataMember};
