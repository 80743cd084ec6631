//! LLM 服务 - 业务能力层
//!
//! 只负责"为一道题生成候选选项"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Ollama 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, GenerationError};

/// 选项生成的提示词前缀，题干紧跟在换行之后
pub const OPTION_PROMPT_PREFIX: &str = "Generate 4 multiple-choice options for the question:";

/// 构建选项生成提示词
pub fn build_option_prompt(question: &str) -> String {
    format!("{}\n{}", OPTION_PROMPT_PREFIX, question)
}

/// 选项生成能力
///
/// 输入单行题干，返回模型的原始文本（格式不保证，需要经过清洗）。
/// 实现方应当无状态，整个批次共享同一个实例。
#[async_trait]
pub trait OptionGenerator: Send + Sync {
    async fn generate(&self, question: &str) -> AppResult<String>;
}

/// LLM 服务
///
/// 职责：
/// - 调用兼容 OpenAI 的 chat completion 接口
/// - 只处理单道题
/// - 只取第一个候选结果
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }

    /// 发送一条用户消息，返回第一个候选的内容
    pub async fn send_to_llm(&self, user_message: &str) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .n(1u8)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content)
    }
}

#[async_trait]
impl OptionGenerator for LlmService {
    async fn generate(&self, question: &str) -> AppResult<String> {
        self.send_to_llm(&build_option_prompt(question)).await
    }
}
