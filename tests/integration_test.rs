use d3w_processor::archive::{extract, list_data_members};
use d3w_processor::error::{AppError, InputError};
use d3w_processor::services::read_json;
use d3w_processor::{process, App, Config, D3wProcessor, RunRequest, WorkConfig};
use serde_json::json;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::FileOptions;

const MAIN_JSON: &str = r#"{"envelopes":[{"key":"ek","path":"e1"}],"services":[{"key":"sk","path":"s1"}],"works":[{"content_class":"Work","key":"wk","name":"雏形","path":"w1"}],"version":3}"#;
const W1_JSON: &str = r#"{"content_class":"Work","key":"template-key","name":"雏形工作","note":"雏形备注","content":{"subject":"雏形件名","datasource":{"fields":["Old"]},"document":{"template":{"name":"tpl","params":[{"name":"Dataset","type":"csv","ignore_empty_row":true,"insert_first_empty_row":false,"values":["[Old]"]}]}}}}"#;
const E1_JSON: &str = "{ \"name\" : \"信封\",  \"keep\":[1,2] }";
const S1_JSON: &str = r#"{"name":"服务"}"#;

fn write_archive(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    for (name, content) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

fn realistic_template(dir: &Path) -> PathBuf {
    let path = dir.join("template.d3w");
    write_archive(
        &path,
        &[("s1", S1_JSON), ("w1", W1_JSON), ("_", MAIN_JSON), ("e1", E1_JSON)],
    );
    path
}

fn entry_names(archive_path: &Path) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

fn entry_text(archive_path: &Path, name: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

fn sales_config(n: usize) -> WorkConfig {
    WorkConfig::new(format!("测试工作{}", n))
        .with_memo_text(format!("备注{}", n))
        .with_subject(format!("件名{}", n))
        .with_template_name(format!("template{}", n))
        .with_text_dataset_fields([format!("项目{}A", n), format!("项目{}B", n)])
        .with_datasource_fields(["Id".to_string(), format!("Field{}__c", n)])
}

#[test]
fn test_process_single_config() {
    let dir = TempDir::new().unwrap();
    let template = realistic_template(dir.path());
    let output = dir.path().join("output.d3w");

    let generated = process(&template, &[sales_config(1)], &output).unwrap();

    assert_eq!(generated, output);
    assert!(fs::metadata(&output).unwrap().len() > 0);
    assert_eq!(entry_names(&output), vec!["_", "w1", "e1", "s1"]);

    let extracted = dir.path().join("extracted");
    extract(&output, &extracted).unwrap();
    let w1 = read_json(&extracted.join("w1")).unwrap();
    assert_eq!(w1["name"], json!("测试工作1"));
    assert_eq!(w1["note"], json!("备注1"));
    assert_eq!(w1["key"], json!(""));
    assert_eq!(w1["content"]["subject"], json!("件名1"));
    assert_eq!(w1["content"]["datasource"]["fields"], json!(["Id", "Field1__c"]));
    assert_eq!(
        w1["content"]["document"]["template"],
        json!({
            "name": "template1",
            "params": [{
                "name": "Dataset",
                "type": "csv",
                "ignore_empty_row": true,
                "insert_first_empty_row": false,
                "values": ["[项目1A]", "[项目1B]"]
            }]
        })
    );
}

#[test]
fn test_process_multiple_configs() {
    let dir = TempDir::new().unwrap();
    let template = realistic_template(dir.path());
    let output = dir.path().join("output_multi.d3w");
    let configs = vec![sales_config(1), sales_config(2), sales_config(3)];

    process(&template, &configs, &output).unwrap();

    assert_eq!(entry_names(&output), vec!["_", "w1", "e1", "s1", "w2", "w3"]);

    let extracted = dir.path().join("extracted");
    extract(&output, &extracted).unwrap();

    for n in 1..=3 {
        let work = read_json(&extracted.join(format!("w{}", n))).unwrap();
        assert_eq!(work["name"], json!(format!("测试工作{}", n)));
        assert_eq!(work["note"], json!(format!("备注{}", n)));
        // 其他配置的字段不会泄漏进来
        assert_eq!(
            work["content"]["datasource"]["fields"],
            json!(["Id", format!("Field{}__c", n)])
        );
        assert_eq!(
            work["content"]["document"]["template"]["params"][0]["values"],
            json!([format!("[项目{}A]", n), format!("[项目{}B]", n)])
        );
    }

    let main = read_json(&extracted.join("_")).unwrap();
    assert_eq!(
        main["works"],
        json!([
            {"content_class": "Work", "key": "", "name": "测试工作1", "path": "w1"},
            {"content_class": "Work", "key": "", "name": "测试工作2", "path": "w2"},
            {"content_class": "Work", "key": "", "name": "测试工作3", "path": "w3"}
        ])
    );
    assert_eq!(main["envelopes"], json!([{"key": "ek", "path": "e1"}]));
    assert_eq!(main["services"], json!([{"key": "sk", "path": "s1"}]));
    assert_eq!(main["version"], json!(3));

    let keys: Vec<&String> = main.keys().collect();
    assert_eq!(keys, vec!["envelopes", "services", "works", "version"]);
}

#[test]
fn test_untouched_members_pass_through_byte_identical() {
    let dir = TempDir::new().unwrap();
    let template = realistic_template(dir.path());
    let output = dir.path().join("output.d3w");

    process(&template, &[sales_config(1)], &output).unwrap();

    assert_eq!(entry_text(&output, "e1"), E1_JSON);
    assert_eq!(entry_text(&output, "s1"), S1_JSON);
    assert!(!entry_text(&output, "_").contains('\n'));
    assert!(!entry_text(&output, "w1").contains('\n'));
}

#[test]
fn test_end_to_end_minimal_template() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("minimal.d3w");
    write_archive(
        &template,
        &[("_", r#"{"works":[{"path":"w1"}]}"#), ("w1", r#"{"name":"T","content":{}}"#)],
    );
    let output = dir.path().join("out.d3w");
    let config = WorkConfig::new("Invoice").with_text_dataset_fields(["A", "B"]);

    process(&template, &[config], &output).unwrap();

    let extracted = dir.path().join("extracted");
    extract(&output, &extracted).unwrap();
    let main = read_json(&extracted.join("_")).unwrap();
    let w1 = read_json(&extracted.join("w1")).unwrap();

    assert_eq!(main["works"], json!([{"key": "", "name": "Invoice", "path": "w1"}]));
    assert_eq!(w1["name"], json!("Invoice"));
    assert_eq!(
        w1["content"]["document"]["template"]["params"][0]["values"],
        json!(["[A]", "[B]"])
    );
}

#[test]
fn test_member_with_oversized_number_passes_through() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("big.d3w");
    write_archive(
        &template,
        &[
            ("_", MAIN_JSON),
            ("w1", W1_JSON),
            ("e99999999999999999999", E1_JSON),
        ],
    );
    let output = dir.path().join("out.d3w");

    process(&template, &[sales_config(1)], &output).unwrap();

    assert_eq!(entry_names(&output), vec!["_", "w1", "e99999999999999999999"]);
    assert_eq!(entry_text(&output, "e99999999999999999999"), E1_JSON);
}

#[test]
fn test_template_snapshot_never_in_output() {
    let dir = TempDir::new().unwrap();
    let template = realistic_template(dir.path());
    let output = dir.path().join("output.d3w");

    process(&template, &[sales_config(1), sales_config(2)], &output).unwrap();

    let extracted = dir.path().join("extracted");
    extract(&output, &extracted).unwrap();
    assert!(!extracted.join("_template_work").exists());
    let names: Vec<String> = list_data_members(&extracted)
        .unwrap()
        .iter()
        .map(|m| m.name.to_string())
        .collect();
    assert_eq!(names, vec!["_", "w1", "e1", "s1", "w2"]);
}

#[test]
fn test_missing_w1_rejected() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("no_w1.d3w");
    write_archive(&template, &[("_", MAIN_JSON), ("e1", E1_JSON)]);
    let output = dir.path().join("output.d3w");

    let err = process(&template, &[sales_config(1)], &output).unwrap_err();

    assert!(matches!(err, AppError::Input(InputError::TemplateWorkMissing)));
    assert!(err.to_string().contains("w1"));
    assert!(!output.exists());
}

#[test]
fn test_extra_work_members_rejected() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("extra.d3w");
    write_archive(
        &template,
        &[("_", MAIN_JSON), ("w1", W1_JSON), ("w2", W1_JSON), ("w10", W1_JSON)],
    );
    let output = dir.path().join("output.d3w");

    let err = process(&template, &[sales_config(1)], &output).unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("w2"));
    assert!(msg.contains("w10"));
    assert!(!output.exists());
}

#[test]
fn test_missing_main_member_rejected() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("no_main.d3w");
    write_archive(&template, &[("w1", W1_JSON)]);
    let output = dir.path().join("output.d3w");

    let err = process(&template, &[sales_config(1)], &output).unwrap_err();

    assert!(matches!(err, AppError::Input(InputError::MainMemberMissing)));
    assert!(!output.exists());
}

#[test]
fn test_duplicate_work_names_produce_no_output() {
    let dir = TempDir::new().unwrap();
    let template = realistic_template(dir.path());
    let output = dir.path().join("output.d3w");
    let configs = vec![
        WorkConfig::new("Sales Report"),
        WorkConfig::new("Sales Report").with_subject("另一份"),
    ];

    let err = process(&template, &configs, &output).unwrap_err();

    assert!(matches!(
        err,
        AppError::Input(InputError::DuplicateWorkName { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_malformed_work_member_is_fatal() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("broken.d3w");
    write_archive(&template, &[("_", MAIN_JSON), ("w1", "{\"name\":")]);
    let output = dir.path().join("output.d3w");

    let err = process(&template, &[sales_config(1)], &output).unwrap_err();

    assert!(matches!(err, AppError::Document(_)));
    assert!(!output.exists());
}

#[test]
fn test_workspace_released_after_success_and_failure() {
    let dir = TempDir::new().unwrap();
    let scratch_root = std::env::temp_dir();
    let prefix = format!("d3w_release_check_{}_", std::process::id());
    let config = Config {
        workspace_prefix: prefix.clone(),
        ..Config::default()
    };
    let processor = D3wProcessor::new(&config);

    let leftovers = || {
        fs::read_dir(&scratch_root)
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().starts_with(&prefix))
            .count()
    };

    let template = realistic_template(dir.path());
    processor
        .process(&template, &[sales_config(1)], &dir.path().join("ok.d3w"))
        .unwrap();
    assert_eq!(leftovers(), 0);

    let broken = dir.path().join("no_w1.d3w");
    write_archive(&broken, &[("_", MAIN_JSON)]);
    assert!(processor
        .process(&broken, &[sales_config(1)], &dir.path().join("ng.d3w"))
        .is_err());
    assert_eq!(leftovers(), 0);
}

#[test]
fn test_output_parent_directory_created() {
    let dir = TempDir::new().unwrap();
    let template = realistic_template(dir.path());
    let output = dir.path().join("nested/dir/output.d3w");

    process(&template, &[sales_config(1)], &output).unwrap();

    assert!(output.is_file());
}

#[tokio::test]
async fn test_app_runs_with_config_files() {
    let dir = TempDir::new().unwrap();
    let template = realistic_template(dir.path());

    let yaml = dir.path().join("work1.yaml");
    fs::write(
        &yaml,
        "workName: 请求书\nmemoText: 月末\ntextDatasetFields:\n  - 金额\n",
    )
    .unwrap();
    let config_dir = dir.path().join("configs");
    fs::create_dir(&config_dir).unwrap();
    fs::write(config_dir.join("b.toml"), "workName = \"报价单\"\n").unwrap();
    fs::write(config_dir.join("a.yml"), "workName: 订单\n").unwrap();

    let output = dir.path().join("app_output.d3w");
    let request = RunRequest {
        template_path: template,
        config_paths: vec![yaml],
        config_dir: Some(config_dir),
        output_path: Some(output.clone()),
    };

    let generated = App::new(Config::default()).run(request).await.unwrap();
    assert_eq!(generated, output);

    let extracted = dir.path().join("extracted");
    extract(&output, &extracted).unwrap();
    let main = read_json(&extracted.join("_")).unwrap();
    let names: Vec<&str> = main["works"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["请求书", "订单", "报价单"]);
}

#[tokio::test]
async fn test_document_name_in_config_not_written() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("doc.d3w");
    write_archive(
        &template,
        &[
            ("_", r#"{"works":[{"path":"w1"}]}"#),
            ("w1", r#"{"name":"T","content":{"document":{"name":"[DocName]"}}}"#),
        ],
    );
    let yaml = dir.path().join("work.yml");
    fs::write(&yaml, "workName: A\ndocumentName: Other\n").unwrap();
    let output = dir.path().join("doc_output.d3w");

    let request = RunRequest {
        template_path: template,
        config_paths: vec![yaml],
        output_path: Some(output.clone()),
        ..Default::default()
    };
    App::new(Config::default()).run(request).await.unwrap();

    let extracted = dir.path().join("extracted");
    extract(&output, &extracted).unwrap();
    let w1 = read_json(&extracted.join("w1")).unwrap();
    assert_eq!(w1["name"], json!("A"));
    assert_eq!(w1["content"]["document"]["name"], json!("[DocName]"));
}

#[tokio::test]
async fn test_app_rejects_non_d3w_template() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("template.zip");
    write_archive(&template, &[("_", MAIN_JSON), ("w1", W1_JSON)]);
    let yaml = dir.path().join("work.yml");
    fs::write(&yaml, "workName: A\n").unwrap();

    let request = RunRequest {
        template_path: template,
        config_paths: vec![yaml],
        ..Default::default()
    };

    assert!(App::new(Config::default()).run(request).await.is_err());
}
