//! Conversation about one open document with an external text generator.
//!
//! The generator itself lives outside this crate behind `ChatService`. The
//! session only keeps the transcript consistent: streamed chunks grow one
//! assistant message, a failure replaces that message with a fixed notice,
//! and a cancelled reply keeps whatever already arrived.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::document::DocumentRecord;

pub const FAILURE_MESSAGE: &str = "ERROR: Connection interrupted. Neural link unstable.";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Chat service error: {0}")]
    Service(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
}

pub type ChunkStream = BoxStream<'static, Result<String, ChatError>>;

/// External generator. Receives the document as system instruction, the
/// prior turns and the new user message, and answers with a finite stream
/// of text chunks.
pub trait ChatService {
    fn send(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> impl Future<Output = Result<ChunkStream, ChatError>>;
}

/// Stops a session from consuming further chunks.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input or closed session; nothing happened.
    Ignored,
    Completed,
    /// The service failed; the assistant turn holds `FAILURE_MESSAGE`.
    Failed,
    /// Closed while streaming; the partial reply is kept.
    Cancelled,
}

#[derive(Debug)]
pub struct ChatSession {
    system_instruction: String,
    messages: Vec<ChatMessage>,
    // Indices of assistant turns that hold `FAILURE_MESSAGE`.
    failed: BTreeSet<usize>,
    next_id: u64,
    cancel: CancelHandle,
}

impl ChatSession {
    pub fn new(record: &DocumentRecord) -> Self {
        let mut session = Self {
            system_instruction: system_instruction(&record.content),
            messages: Vec::new(),
            failed: BTreeSet::new(),
            next_id: 0,
            cancel: CancelHandle::default(),
        };
        let greeting = format!(
            "Connection established. I have analyzed \"{}\". Ask me anything about the script.",
            record.title
        );
        session.push(Role::Model, greeting);
        session
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Send one user turn and stream the reply into the transcript.
    pub async fn send<C: ChatService>(&mut self, service: &C, input: &str) -> SendOutcome {
        let input = input.trim();
        if input.is_empty() || self.is_closed() {
            return SendOutcome::Ignored;
        }

        let history = self.history();
        self.push(Role::User, input.to_string());
        let reply = self.push(Role::Model, String::new());

        let mut stream = match service.send(&self.system_instruction, &history, input).await {
            Ok(stream) => stream,
            Err(e) => return self.fail(reply, &e),
        };

        while let Some(chunk) = stream.next().await {
            if self.is_closed() {
                return SendOutcome::Cancelled;
            }
            match chunk {
                Ok(text) => self.messages[reply].text.push_str(&text),
                Err(e) => return self.fail(reply, &e),
            }
        }
        SendOutcome::Completed
    }

    /// Turns the service has actually seen.
    ///
    /// The greeting is local, and a failed exchange (the user turn and the
    /// notice that replaced its reply) never reached the service.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(i, _)| !self.failed.contains(i) && !self.failed.contains(&(i + 1)))
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn fail(&mut self, reply: usize, error: &ChatError) -> SendOutcome {
        warn!(error = %error, "chat reply failed");
        self.messages[reply].text = FAILURE_MESSAGE.to_string();
        self.failed.insert(reply);
        SendOutcome::Failed
    }

    fn push(&mut self, role: Role, text: String) -> usize {
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: format!("msg-{}", self.next_id),
            role,
            text,
        });
        self.messages.len() - 1
    }
}

fn system_instruction(content: &str) -> String {
    format!(
        "You are an AI Analyst for the YouTube channel 'CryptoFuture 2026'.\n\
         You have access to the following video script.\n\
         Your persona is: Cyberpunk, analytical, slightly edgy, concise, and very knowledgeable about crypto.\n\
         Always answer questions based on the provided script content primarily, \
         but you can use your general knowledge to fill gaps.\n\n\
         SCRIPT CONTENT:\n\"\"\"\n{content}\n\"\"\"\n"
    )
}
