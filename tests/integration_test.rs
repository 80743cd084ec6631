use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pdf_quiz_gen::error::{AppError, AppResult};
use pdf_quiz_gen::infrastructure::{
    DocumentSource, DocumentTextExtractor, FolderSource, JsonFileSink, MANIFEST_FILE,
};
use pdf_quiz_gen::models::{DocumentKind, SourceDocument};
use pdf_quiz_gen::{App, Config, OptionGenerator, QuizDocument};

/// 内存中的文档来源；没有内容的文档读取时报错
struct MemorySource {
    documents: Vec<(SourceDocument, Option<Vec<u8>>)>,
}

impl MemorySource {
    fn new() -> Self {
        Self {
            documents: Vec::new(),
        }
    }

    fn text(mut self, name: &str, content: &str) -> Self {
        let doc = SourceDocument::from_path(name).expect("支持的扩展名");
        self.documents.push((doc, Some(content.as_bytes().to_vec())));
        self
    }

    fn bytes(mut self, name: &str, content: &[u8]) -> Self {
        let doc = SourceDocument::from_path(name).expect("支持的扩展名");
        self.documents.push((doc, Some(content.to_vec())));
        self
    }

    fn unreadable(mut self, name: &str) -> Self {
        let doc = SourceDocument::from_path(name).expect("支持的扩展名");
        self.documents.push((doc, None));
        self
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn list(&self) -> AppResult<Vec<SourceDocument>> {
        Ok(self.documents.iter().map(|(d, _)| d.clone()).collect())
    }

    async fn fetch(&self, document: &SourceDocument) -> AppResult<Vec<u8>> {
        self.documents
            .iter()
            .find(|(d, _)| d == document)
            .and_then(|(_, bytes)| bytes.clone())
            .ok_or_else(|| {
                AppError::file_read_failed(
                    document.name.clone(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                )
            })
    }
}

/// 按题目返回固定结果的生成器，记录调用次数
struct StubGenerator {
    replies: HashMap<&'static str, &'static str>,
    calls: Mutex<usize>,
}

impl StubGenerator {
    fn new(replies: &[(&'static str, &'static str)]) -> Self {
        Self {
            replies: replies.iter().copied().collect(),
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl OptionGenerator for StubGenerator {
    async fn generate(&self, question: &str) -> AppResult<String> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.replies.get(question).copied().unwrap_or("").to_string())
    }
}

fn test_config(dir: &std::path::Path) -> Config {
    Config {
        source_folder: dir.join("input").display().to_string(),
        output_folder: dir.join("output").display().to_string(),
        output_log_file: dir.join("output.txt").display().to_string(),
        skip_file: dir.join("skipped.txt").display().to_string(),
        generation_timeout_secs: 5,
        ..Config::default()
    }
}

fn read_quiz(path: PathBuf) -> QuizDocument {
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("无法读取 {}: {}", path.display(), e));
    serde_json::from_str(&content).expect("测验 JSON 格式正确")
}

#[tokio::test]
async fn test_batch_writes_quizzes_and_skips_failures() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let output = PathBuf::from(&config.output_folder);

    let source = MemorySource::new()
        .text(
            "Chapter1.txt",
            "Is the sky blue?\nThe sky is blue.\nWhat is 2+2?\nTrue or False: Water boils at 100C?",
        )
        .unreadable("Lost.pdf")
        .bytes("Broken.pdf", b"not really a pdf")
        .text("Geography.md", "Which city is the capital of France?\n\n");

    let generator = Arc::new(StubGenerator::new(&[
        ("Is the sky blue?", "Yes, No, Sometimes, Never"),
        ("What is 2+2?", ""),
        (
            "Which city is the capital of France?",
            "Paris - London - Berlin - Madrid",
        ),
    ]));

    let sink = Arc::new(JsonFileSink::create(&output).await.unwrap());
    let app = App::with_components(
        config.clone(),
        Arc::new(source),
        Arc::new(DocumentTextExtractor::new()),
        generator.clone(),
        sink,
    );

    let summary = app.run().await.unwrap();

    assert_eq!(summary.total, 4);
    assert_eq!(summary.success, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.questions.true_false, 1);
    assert_eq!(summary.questions.generated, 2);
    assert_eq!(summary.questions.fallback, 1);
    assert_eq!(generator.calls(), 3);

    let chapter = read_quiz(output.join("Chapter1.json"));
    assert_eq!(chapter.title, "Chapter1");
    assert_eq!(chapter.questions.len(), 3);
    assert_eq!(chapter.questions[0].question, "Is the sky blue?");
    assert_eq!(
        chapter.questions[0].options,
        vec!["Yes", "No", "Sometimes", "Never"]
    );
    assert_eq!(
        chapter.questions[1].options,
        vec!["Option1", "Option2", "Option3", "Option4"]
    );
    assert_eq!(chapter.questions[2].options, vec!["True", "False"]);
    assert!(chapter.questions.iter().all(|q| q.correct_answer == -1));

    let geography = read_quiz(output.join("Geography.json"));
    assert_eq!(
        geography.questions[0].options,
        vec!["Paris", "London", "Berlin", "Madrid"]
    );

    // 失败的文档不产生任何输出
    assert!(!output.join("Lost.json").exists());
    assert!(!output.join("Broken.json").exists());

    let skipped = std::fs::read_to_string(&config.skip_file).unwrap();
    assert_eq!(skipped.lines().count(), 2);
    assert!(skipped.contains("Lost.pdf"));
    assert!(skipped.contains("Broken.pdf"));

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.join(MANIFEST_FILE)).unwrap())
            .unwrap();
    let files: Vec<&str> = manifest["quizzes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["file"].as_str().unwrap())
        .collect();
    assert_eq!(files, vec!["Chapter1.json", "Geography.json"]);
}

#[tokio::test]
async fn test_document_without_questions_yields_empty_quiz() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        write_manifest: false,
        ..test_config(dir.path())
    };
    let output = PathBuf::from(&config.output_folder);

    let source = MemorySource::new().text("Notes.txt", "Just prose.\nNo questions here.");
    let generator = Arc::new(StubGenerator::new(&[]));
    let app = App::with_components(
        config,
        Arc::new(source),
        Arc::new(DocumentTextExtractor::new()),
        generator.clone(),
        Arc::new(JsonFileSink::create(&output).await.unwrap()),
    );

    let summary = app.run().await.unwrap();

    assert_eq!(summary.success, 1);
    assert_eq!(generator.calls(), 0);
    let quiz = read_quiz(output.join("Notes.json"));
    assert_eq!(quiz.title, "Notes");
    assert!(quiz.questions.is_empty());
    assert!(!output.join(MANIFEST_FILE).exists());
}

#[tokio::test]
async fn test_same_title_keeps_manifest_in_sync_with_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let output = PathBuf::from(&config.output_folder);

    let source = MemorySource::new()
        .text("Chapter1.md", "Is it raining?\nIs it cold?\nIs it late?")
        .text("Chapter1.txt", "True or False: Snow is white?");

    let app = App::with_components(
        config,
        Arc::new(source),
        Arc::new(DocumentTextExtractor::new()),
        Arc::new(StubGenerator::new(&[])),
        Arc::new(JsonFileSink::create(&output).await.unwrap()),
    );

    let summary = app.run().await.unwrap();
    assert_eq!(summary.success, 2);
    assert_eq!(summary.written.len(), 1);

    let on_disk = read_quiz(output.join("Chapter1.json"));
    assert_eq!(on_disk.questions.len(), 1);

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.join(MANIFEST_FILE)).unwrap())
            .unwrap();
    let quizzes = manifest["quizzes"].as_array().unwrap();
    assert_eq!(quizzes.len(), 1);
    assert_eq!(quizzes[0]["file"], "Chapter1.json");
    assert_eq!(quizzes[0]["questionCount"], 1);
}

#[tokio::test]
async fn test_folder_source_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let input = PathBuf::from(&config.source_folder);
    let output = PathBuf::from(&config.output_folder);
    std::fs::create_dir_all(&input).unwrap();
    std::fs::write(input.join("week1.csv"), "question,answer\nIs 7 prime?,yes\n").unwrap();
    std::fs::write(input.join("cover.png"), b"\x89PNG").unwrap();

    let app = App::with_components(
        config.clone(),
        Arc::new(FolderSource::new(&input)),
        Arc::new(DocumentTextExtractor::new()),
        Arc::new(StubGenerator::new(&[("Is 7 prime?,yes", "yes\nno")])),
        Arc::new(JsonFileSink::create(&output).await.unwrap()),
    );

    let summary = app.run().await.unwrap();
    assert_eq!(summary.total, 1);

    let quiz = read_quiz(output.join("week1.json"));
    assert_eq!(quiz.questions.len(), 1);
    assert_eq!(quiz.questions[0].question, "Is 7 prime?,yes");
    assert_eq!(quiz.questions[0].options, vec!["yes", "no"]);
}

#[tokio::test]
async fn test_missing_source_folder_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let app = App::with_components(
        config.clone(),
        Arc::new(FolderSource::new(&config.source_folder)),
        Arc::new(DocumentTextExtractor::new()),
        Arc::new(StubGenerator::new(&[])),
        Arc::new(JsonFileSink::create(&config.output_folder).await.unwrap()),
    );

    assert!(app.run().await.is_err());
}

#[test]
fn test_source_document_kind_for_exports() {
    assert_eq!(
        SourceDocument::from_path("drive/Lecture Notes.txt").unwrap().kind,
        DocumentKind::PlainText
    );
    assert_eq!(
        SourceDocument::from_path("drive/Marks.csv").unwrap().kind,
        DocumentKind::Csv
    );
}

/// 需要真实 LLM 端点和 input/ 目录，运行方式：cargo test -- --ignored
#[tokio::test]
#[ignore]
async fn test_run_with_live_model() {
    let config = Config::load(None).expect("配置加载失败");
    let app = App::initialize(config).await.expect("初始化失败");
    let summary = app.run().await.expect("运行失败");
    println!("{:?}", summary);
}
