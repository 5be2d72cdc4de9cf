//! LLM 服务 - 业务能力层
//!
//! 只负责"生成一段文本"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（默认指向 DeepSeek）

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};

/// LLM 服务
///
/// 职责：
/// - 发起一次聊天补全请求并返回文本
/// - 把远端错误归类为认证 / API / 传输三类
/// - 不重试，单次失败即对本次请求终止
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    max_tokens: u32,
    has_api_key: bool,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            max_tokens: config.llm_max_tokens,
            has_api_key: !config.llm_api_key.trim().is_empty(),
        }
    }

    /// 发起一次生成请求
    ///
    /// # 参数
    /// - `prompt`: 组装好的用户消息
    /// - `system_message`: 系统消息
    /// - `temperature`: 采样温度，绑定到创意度滑块
    ///
    /// # 返回
    /// 返回模型生成的文本（去除首尾空白）
    pub async fn generate(
        &self,
        prompt: &str,
        system_message: &str,
        temperature: f32,
    ) -> AppResult<String> {
        // 凭据缺失直接报认证错误，不发起网络请求
        if !self.has_api_key {
            return Err(AppError::Llm(LlmError::AuthFailed));
        }

        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("temperature: {}, max_tokens: {}", temperature, self.max_tokens);
        debug!("用户消息长度: {} 字符", prompt.chars().count());

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_message)
            .build()
            .map_err(|e| self.classify_error(e))?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| self.classify_error(e))?;

        let messages = vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| self.classify_error(e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            self.classify_error(e)
        })?;

        debug!("LLM API 调用成功");

        let message = response
            .choices
            .first()
            .ok_or_else(|| {
                AppError::Llm(LlmError::EmptyResponse {
                    model: self.model_name.clone(),
                })
            })?
            .message
            .clone();

        let content = message.content.ok_or_else(|| {
            AppError::Llm(LlmError::EmptyContent {
                model: self.model_name.clone(),
            })
        })?;

        Ok(content.trim().to_string())
    }

    /// 把 async-openai 错误归类到应用错误
    fn classify_error(&self, err: OpenAIError) -> AppError {
        match err {
            OpenAIError::ApiError(api) => {
                if is_auth_error(&api.message, api.r#type.as_deref()) {
                    AppError::Llm(LlmError::AuthFailed)
                } else {
                    AppError::Llm(LlmError::ApiCallFailed {
                        model: self.model_name.clone(),
                        message: api.message,
                    })
                }
            }
            other => {
                let message = other.to_string();
                if is_transport_error(&message) {
                    AppError::Llm(LlmError::Transport { message })
                } else {
                    AppError::Llm(LlmError::ApiCallFailed {
                        model: self.model_name.clone(),
                        message,
                    })
                }
            }
        }
    }
}

/// 远端错误是否属于认证失败
fn is_auth_error(message: &str, err_type: Option<&str>) -> bool {
    if let Some(t) = err_type {
        let t = t.to_ascii_lowercase();
        if t.contains("authentication") || t.contains("invalid_api_key") {
            return true;
        }
    }
    let message = message.to_ascii_lowercase();
    message.contains("api key")
        || message.contains("authentication")
        || message.contains("unauthorized")
        || message.contains("401")
}

/// 错误文本是否属于网络传输层失败
fn is_transport_error(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("connect")
        || message.contains("timed out")
        || message.contains("timeout")
        || message.contains("dns")
        || message.contains("network")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 创建测试用的 LlmService
    fn create_test_service(api_key: &str) -> LlmService {
        let config = Config {
            llm_api_key: api_key.to_string(),
            ..Config::default()
        };
        LlmService::new(&config)
    }

    #[test]
    fn test_is_auth_error() {
        assert!(is_auth_error("Incorrect API key provided", None));
        assert!(is_auth_error("Authentication Fails", None));
        assert!(is_auth_error("whatever", Some("authentication_error")));
        assert!(!is_auth_error("rate limit exceeded", Some("rate_limit_error")));
    }

    #[test]
    fn test_is_transport_error() {
        assert!(is_transport_error("error sending request: connection refused"));
        assert!(is_transport_error("operation timed out"));
        assert!(!is_transport_error("model not found"));
    }

    #[tokio::test]
    async fn test_generate_without_api_key_fails_fast() {
        let service = create_test_service("");
        let result = service.generate("你好", "系统", 0.5).await;
        match result {
            Err(AppError::Llm(LlmError::AuthFailed)) => {}
            other => panic!("缺失 API Key 应报认证错误，实际: {:?}", other.err()),
        }
    }

    /// 真实 API 调用，默认忽略，需要手动运行：cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_generate_real_api() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env();
        let service = LlmService::new(&config);

        let response = service
            .generate("请回复「收到」两个字", "你是一个友好的助手", 0.0)
            .await
            .expect("LLM 调用失败");

        println!("LLM 响应: {}", response);
        assert!(!response.is_empty());
    }
}
