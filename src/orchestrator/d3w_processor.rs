//! D3W 处理器 - 编排层
//!
//! ## 处理流程
//!
//! 1. 检查工作名是否重复
//! 2. 把雏形 .d3w 解压到临时工作区
//! 3. 查找主成员 `_`
//! 4. 校验雏形：必须有 `w1`，不能有其他工作成员
//! 5. 把 `w1` 复制为快照 `_template_work`，然后删除 `w1`
//! 6. 按配置顺序从快照生成 `w1`, `w2`, `w3`...
//! 7. 删除快照
//! 8. 改写主成员的 `works`
//! 9. 重新打包为输出 .d3w
//! 10. 释放工作区（无论成功与否）

use crate::archive::{self, DataMember};
use crate::config::Config;
use crate::error::{AppError, AppResult, DocumentError, InputError};
use crate::infrastructure::Workspace;
use crate::models::member::TEMPLATE_SNAPSHOT;
use crate::models::work_config::WorkConfig;
use crate::models::work_reference::WorkReference;
use crate::services::json_editor::{read_json, write_json, JsonObjectExt};
use crate::workflow::{WorkCtx, WorkFlow};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// D3W 处理器
#[derive(Debug, Clone)]
pub struct D3wProcessor {
    workspace_prefix: String,
}

impl Default for D3wProcessor {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl D3wProcessor {
    pub fn new(config: &Config) -> Self {
        Self {
            workspace_prefix: config.workspace_prefix.clone(),
        }
    }

    /// 由雏形和工作配置生成新的 .d3w 文件，返回输出路径
    ///
    /// 任何错误都会中断处理且不产生输出文件；临时工作区总会被释放。
    pub fn process(
        &self,
        template_path: &Path,
        configs: &[WorkConfig],
        output_path: &Path,
    ) -> AppResult<PathBuf> {
        info!("\n=== 处理开始 ===");
        info!("✓ 工作配置: {} 个", configs.len());

        check_duplicate_work_names(configs)?;

        // 工作区在本函数结束时 Drop，错误路径同样会清理
        let workspace = archive::extract_to_temp(template_path, &self.workspace_prefix)?;
        info!("✓ 解压完成: {}", workspace.path().display());

        let members = archive::list_data_members(workspace.path())?;
        info!("✓ 现有成员: {} 个", members.len());

        let main_member = find_main_member(&members)?;

        info!("\n--- 雏形校验 ---");
        let template_work = validate_template(&members)?;
        info!("✓ 校验完成");

        info!("\n--- 保存雏形快照 ---");
        let snapshot = preserve_template_work(&template_work.path, &workspace)?;
        remove_member(&template_work.path)?;
        info!("✓ 删除: {}", template_work.name);

        info!("\n--- 生成工作成员 ---");
        let flow = WorkFlow::new(&snapshot, workspace.path());
        let works = generate_works(&flow, configs)?;

        remove_member(&snapshot)?;
        info!("\n✓ 删除快照: {}", TEMPLATE_SNAPSHOT);

        info!("\n--- 改写主成员 ---");
        rewrite_main_member(&main_member.path, &works)?;
        info!("✓ 改写完成: {}", main_member.name);

        info!("\n--- 构建 D3W 文件 ---");
        archive::ensure_parent_dir(output_path)?;
        archive::build(workspace.path(), output_path)?;
        info!("✓ 构建完成: {}", output_path.display());

        drop(workspace);
        info!("✓ 清理完成");
        info!("\n=== 处理完成 ===");

        Ok(output_path.to_path_buf())
    }
}

/// 使用默认配置处理
pub fn process(
    template_path: &Path,
    configs: &[WorkConfig],
    output_path: &Path,
) -> AppResult<PathBuf> {
    D3wProcessor::default().process(template_path, configs, output_path)
}

/// 工作名不能重复（两个都未设置也算重复）
fn check_duplicate_work_names(configs: &[WorkConfig]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for config in configs {
        if !seen.insert(config.work_name.as_deref()) {
            return Err(InputError::DuplicateWorkName {
                name: config.display_name().to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn find_main_member(members: &[DataMember]) -> AppResult<&DataMember> {
    members
        .iter()
        .find(|m| m.name.is_main())
        .ok_or_else(|| InputError::MainMemberMissing.into())
}

/// 雏形必须正好包含 `w1` 这一个工作成员
fn validate_template(members: &[DataMember]) -> AppResult<&DataMember> {
    let mut template_work = None;
    let mut extra_works = Vec::new();

    for member in members.iter().filter(|m| m.name.is_work()) {
        if member.name.is_template_work() {
            info!("  ✓ w1: 存在");
            template_work = Some(member);
        } else {
            extra_works.push(member.name.to_string());
        }
    }

    let template_work = template_work.ok_or(InputError::TemplateWorkMissing)?;

    if !extra_works.is_empty() {
        return Err(InputError::ExtraWorkMembers {
            members: extra_works,
        }
        .into());
    }

    Ok(template_work)
}

/// 把 `w1` 原样复制为快照
fn preserve_template_work(template_work: &Path, workspace: &Workspace) -> AppResult<PathBuf> {
    let snapshot = workspace.member_path(TEMPLATE_SNAPSHOT);
    fs::copy(template_work, &snapshot)
        .map_err(|e| AppError::file_write_failed(snapshot.display().to_string(), e))?;

    info!("✓ 快照保存: w1 → {}", TEMPLATE_SNAPSHOT);
    Ok(snapshot)
}

fn remove_member(path: &Path) -> AppResult<()> {
    fs::remove_file(path).map_err(|e| AppError::delete_failed(path.display().to_string(), e))
}

fn generate_works(flow: &WorkFlow, configs: &[WorkConfig]) -> AppResult<Vec<WorkReference>> {
    let total = configs.len();
    configs
        .iter()
        .enumerate()
        .map(|(idx, config)| {
            let ctx = WorkCtx::new(idx + 1, total, config.display_name());
            flow.run(config, &ctx)
        })
        .collect()
}

/// 整体替换 `works`，其他顶层字段保持不变
fn rewrite_main_member(main_path: &Path, works: &[WorkReference]) -> AppResult<()> {
    let mut main = read_json(main_path)?;

    let items = works
        .iter()
        .map(|work| {
            serde_json::to_value(work)
                .map_err(|source| AppError::from(DocumentError::SerializeFailed { source }))
        })
        .collect::<AppResult<Vec<Value>>>()?;
    main.replace_array("works", items);

    write_json(&main, main_path)
}
