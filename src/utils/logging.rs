//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::orchestrator::RunSummary;
use crate::workflow::DocumentCtx;

/// 初始化日志：控制台 + 日志文件
///
/// `RUST_LOG` 优先；未设置时为 `info`，开启 `verbose_logging` 时为 `debug`。
pub fn init(config: &Config) -> Result<()> {
    init_log_file(&config.output_log_file)?;

    let log_file = OpenOptions::new()
        .append(true)
        .open(&config.output_log_file)
        .with_context(|| format!("无法打开日志文件: {}", config.output_log_file))?;

    let default_level = if config.verbose_logging { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .try_init()
        .context("日志初始化失败")?;

    Ok(())
}

/// 初始化日志文件（覆盖旧内容，写入带时间的标题）
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n测验生成日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文档测验生成模式");
    info!("📂 输入目录: {}", config.source_folder);
    info!("📂 输出目录: {}", config.output_folder);
    info!("🤖 模型: {}", config.llm_model_name);
    info!("{}", "=".repeat(60));
}

/// 记录文档加载信息
pub fn log_documents_loaded(total: usize) {
    info!("✓ 找到 {} 个待处理的文档", total);
    info!("💡 逐个处理，每份文档完成后再开始下一份\n");
}

/// 记录单份文档开始处理
pub fn log_document_start(ctx: &DocumentCtx) {
    info!("\n{}", "─".repeat(60));
    info!("{} 开始处理: {}", ctx, ctx.name);
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &RunSummary, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.success, summary.total);
    info!("❌ 跳过: {}", summary.skipped);
    info!(
        "📝 题目: 共 {} (判断题 {}, 生成选项 {}, 占位选项 {})",
        summary.questions.total(),
        summary.questions.true_false,
        summary.questions.generated,
        summary.questions.fallback
    );
    info!("{}", "=".repeat(60));
    if summary.skipped > 0 {
        info!("跳过的文档已记录至: {}", config.skip_file);
    }
    info!("\n日志已保存至: {}", config.output_log_file);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
