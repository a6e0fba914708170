//! 类型模块：聊天补全协议的请求与响应结构。
//!
//! # Types Module
//!
//! Wire types for the chat-completion JSON shape shared by OpenAI-compatible
//! services.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and content |
//! | [`MessageRole`] | Message role (system, user, assistant) |
//! | [`ChatRequest`] | `{model, messages}` request body |
//! | [`ChatCompletion`] | Completion response with choices |
//!
//! ## Example
//!
//! ```rust
//! use llm_probe::types::{ChatRequest, Message};
//!
//! let req = ChatRequest::new("gemini-2.0-flash", vec![Message::user("Hello")]);
//! assert_eq!(req.messages.len(), 1);
//! ```

pub mod chat;
pub mod message;

pub use chat::{model_ids, ChatCompletion, ChatRequest, Choice, ChoiceMessage, Usage};
pub use message::{Message, MessageRole};
