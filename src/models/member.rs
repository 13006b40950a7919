//! 归档成员命名规则
//!
//! 数据成员只有两种名字：
//! - `_`：主成员（唯一）
//! - `{w|e|s}{正整数}`：工作 / 信封 / 服务成员
//!
//! 规范顺序：`_` 最前，之后按数字升序；数字相同时 `w < e < s`。
//! 编号按十进制文本比较，位数不受整数类型限制。
//! 不符合规则的文件名（例如雏形快照 `_template_work`）一律不算数据成员。

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// 主成员名
pub const MAIN_MEMBER: &str = "_";

/// 雏形工作成员名
pub const TEMPLATE_WORK_MEMBER: &str = "w1";

/// 雏形快照的保留名，不符合命名规则，因此不会被扫描到
pub const TEMPLATE_SNAPSHOT: &str = "_template_work";

static NUMBERED_MEMBER: OnceLock<Regex> = OnceLock::new();

fn numbered_member_pattern() -> &'static Regex {
    NUMBERED_MEMBER.get_or_init(|| Regex::new(r"^([wes])(\d+)$").expect("成员名正则有效"))
}

/// 成员种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKind {
    /// 工作 `w`
    Work,
    /// 信封 `e`
    Envelope,
    /// 服务 `s`
    Service,
}

impl MemberKind {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "w" => Some(MemberKind::Work),
            "e" => Some(MemberKind::Envelope),
            "s" => Some(MemberKind::Service),
            _ => None,
        }
    }
}

/// 数据成员名
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberName {
    /// 主成员 `_`
    Main,
    /// 带编号的成员，保留原始文本（`w01` 与 `w1` 是两个不同的文件）
    Numbered { kind: MemberKind, raw: String },
}

impl MemberName {
    /// 解析文件名，不符合命名规则时返回 `None`
    pub fn parse(name: &str) -> Option<Self> {
        if name == MAIN_MEMBER {
            return Some(MemberName::Main);
        }

        let caps = numbered_member_pattern().captures(name)?;
        let kind = MemberKind::from_prefix(caps.get(1)?.as_str())?;

        Some(MemberName::Numbered {
            kind,
            raw: name.to_string(),
        })
    }

    /// 生成的第 `index` 个工作成员名（从 1 开始）
    pub fn work(index: usize) -> Self {
        MemberName::Numbered {
            kind: MemberKind::Work,
            raw: format!("w{}", index),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MemberName::Main => MAIN_MEMBER,
            MemberName::Numbered { raw, .. } => raw,
        }
    }

    pub fn is_main(&self) -> bool {
        matches!(self, MemberName::Main)
    }

    pub fn is_work(&self) -> bool {
        matches!(
            self,
            MemberName::Numbered {
                kind: MemberKind::Work,
                ..
            }
        )
    }

    /// 去掉前导零的编号文本（`w007` → `7`，`w0` → 空串）
    fn digits(&self) -> &str {
        match self {
            MemberName::Main => "",
            MemberName::Numbered { raw, .. } => raw[1..].trim_start_matches('0'),
        }
    }

    /// 是否正好是雏形的 `w1`
    pub fn is_template_work(&self) -> bool {
        self.as_str() == TEMPLATE_WORK_MEMBER
    }
}

impl Ord for MemberName {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (MemberName::Main, MemberName::Main) => Ordering::Equal,
            (MemberName::Main, _) => Ordering::Less,
            (_, MemberName::Main) => Ordering::Greater,
            (
                MemberName::Numbered { kind: k1, raw: r1 },
                MemberName::Numbered { kind: k2, raw: r2 },
            ) => compare_digits(self.digits(), other.digits())
                .then(k1.cmp(k2))
                .then_with(|| r1.cmp(r2)),
        }
    }
}

// 无前导零的十进制文本：位数少的更小，位数相同按字典序
fn compare_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl PartialOrd for MemberName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
