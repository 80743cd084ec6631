use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 默认配置文件名（存在时自动加载）
pub const DEFAULT_CONFIG_FILE: &str = "quizgen.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 待处理文档所在目录
    pub source_folder: String,
    /// 测验 JSON 输出目录
    pub output_folder: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 被跳过文档的记录文件
    pub skip_file: String,
    /// 是否在输出目录写入 manifest.json
    pub write_manifest: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    /// 单次选项生成的超时时间（秒）
    pub generation_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_folder: "input".to_string(),
            output_folder: "output".to_string(),
            output_log_file: "output.txt".to_string(),
            skip_file: "skipped.txt".to_string(),
            write_manifest: true,
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            llm_temperature: 0.7,
            llm_max_tokens: 256,
            generation_timeout_secs: 60,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件 → 环境变量
    ///
    /// `path` 为 `None` 时尝试当前目录下的 `quizgen.toml`，不存在则跳过。
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        base.with_env_overrides(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        let config = toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })?;
        Ok(config)
    }

    /// 用环境变量覆盖配置项
    ///
    /// `lookup` 便于测试时替换真实环境。
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AppResult<Self> {
        if let Some(v) = lookup("SOURCE_FOLDER") {
            self.source_folder = v;
        }
        if let Some(v) = lookup("OUTPUT_FOLDER") {
            self.output_folder = v;
        }
        if let Some(v) = lookup("OUTPUT_LOG_FILE") {
            self.output_log_file = v;
        }
        if let Some(v) = lookup("SKIP_FILE") {
            self.skip_file = v;
        }
        if let Some(v) = lookup("WRITE_MANIFEST") {
            self.write_manifest = parse_env("WRITE_MANIFEST", v, "bool")?;
        }
        if let Some(v) = lookup("VERBOSE_LOGGING") {
            self.verbose_logging = parse_env("VERBOSE_LOGGING", v, "bool")?;
        }
        if let Some(v) = lookup("LLM_API_KEY") {
            self.llm_api_key = v;
        }
        if let Some(v) = lookup("LLM_API_BASE_URL") {
            self.llm_api_base_url = v;
        }
        if let Some(v) = lookup("LLM_MODEL_NAME") {
            self.llm_model_name = v;
        }
        if let Some(v) = lookup("LLM_TEMPERATURE") {
            self.llm_temperature = parse_env("LLM_TEMPERATURE", v, "f32")?;
        }
        if let Some(v) = lookup("LLM_MAX_TOKENS") {
            self.llm_max_tokens = parse_env("LLM_MAX_TOKENS", v, "u32")?;
        }
        if let Some(v) = lookup("GENERATION_TIMEOUT_SECS") {
            let secs: u64 = parse_env("GENERATION_TIMEOUT_SECS", v.clone(), "u64")?;
            if secs == 0 {
                return Err(ConfigError::EnvVarParseFailed {
                    var_name: "GENERATION_TIMEOUT_SECS".to_string(),
                    value: v,
                    expected_type: "正整数 (>= 1)".to_string(),
                }
                .into());
            }
            self.generation_timeout_secs = secs;
        }
        Ok(self)
    }
}

fn parse_env<T: std::str::FromStr>(var_name: &str, value: String, expected_type: &str) -> AppResult<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: expected_type.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            source_folder = "pdfs"
            llm_model_name = "qwen2.5"
            "#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.source_folder, "pdfs");
        assert_eq!(config.llm_model_name, "qwen2.5");
        assert_eq!(config.output_folder, "output");
        assert_eq!(config.generation_timeout_secs, 60);
        assert!(config.write_manifest);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = Config::from_toml_str("source_folder = [", "broken.toml").unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("OUTPUT_FOLDER", "quizzes"),
            ("GENERATION_TIMEOUT_SECS", "5"),
            ("WRITE_MANIFEST", "false"),
        ]
        .into_iter()
        .collect();

        let config = Config::default()
            .with_env_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.output_folder, "quizzes");
        assert_eq!(config.generation_timeout_secs, 5);
        assert!(!config.write_manifest);
        assert_eq!(config.source_folder, "input");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = Config::default()
            .with_env_overrides(|name| (name == "GENERATION_TIMEOUT_SECS").then(|| "0".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("GENERATION_TIMEOUT_SECS"));
        assert!(matches!(
            err,
            crate::error::AppError::Config(ConfigError::EnvVarParseFailed { .. })
        ));
    }

    #[test]
    fn test_bad_env_value_is_rejected() {
        let err = Config::default()
            .with_env_overrides(|name| (name == "LLM_MAX_TOKENS").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("LLM_MAX_TOKENS"));
    }
}
