use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use pdf_quiz_gen::utils::logging;
use pdf_quiz_gen::{App, Config};

/// 从文档中识别题目并生成测验 JSON
#[derive(Debug, Parser)]
#[command(name = "pdf_quiz_gen", version)]
struct Cli {
    /// 待处理文档所在目录（覆盖配置）
    source: Option<String>,
    /// 测验输出目录（覆盖配置）
    output: Option<String>,
    /// 配置文件路径，默认读取当前目录下的 quizgen.toml（如存在）
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.source_folder = source;
    }
    if let Some(output) = cli.output {
        config.output_folder = output;
    }

    // 初始化日志
    logging::init(&config)?;

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
