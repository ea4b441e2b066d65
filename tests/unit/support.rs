//! Shared in-memory fakes for the publisher and orchestrator tests.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{Duration, Utc};
use lc_herald::errors::{FetchError, PublishError};
use lc_herald::models::{
    Artifact, CompanyCategory, CompanyEncounter, CompanyStats, DailyChallenge, Difficulty,
    QuestionRecord, SimilarQuestionRef, ThreadHandle,
};
use lc_herald::publish::{ThreadMessage, ThreadSurface};
use lc_herald::remote::QuestionSource;

/// Channel id the fake surface recognizes.
pub const CHANNEL: u64 = 42;

/// User id used as the invoker in tests.
pub const INVOKER: u64 = 7;

pub fn sample_question() -> QuestionRecord {
    QuestionRecord {
        slug: "two-sum".into(),
        title: "Two Sum".into(),
        difficulty: Difficulty::Easy,
        paid_only: false,
        topics: vec!["Array".into(), "Hash Table".into()],
        link: "https://leetcode.com/problems/two-sum".into(),
    }
}

pub fn sample_daily() -> DailyChallenge {
    DailyChallenge {
        date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
        link: "https://leetcode.com/problems/two-sum/".into(),
        question: sample_question(),
    }
}

pub fn sample_stats() -> CompanyStats {
    CompanyStats {
        categories: vec![CompanyCategory {
            label: "6-Month".into(),
            companies: vec![CompanyEncounter {
                name: "Google".into(),
                times_encountered: 12,
            }],
        }],
    }
}

pub fn sample_similar() -> SimilarQuestionRef {
    SimilarQuestionRef {
        title: "3Sum".into(),
        slug: "3sum".into(),
        difficulty: Difficulty::Medium,
        paid_only: false,
    }
}

// ── Fake platform surface ───────────────────────────────

#[derive(Debug, Default)]
pub struct SurfaceState {
    next_id: u64,
    pub threads: Vec<ThreadHandle>,
    pub posted: Vec<(u64, Artifact)>,
    pub notes: Vec<(u64, String)>,
    pub messages: HashMap<u64, Vec<ThreadMessage>>,
}

/// In-memory [`ThreadSurface`] recording every call.
pub struct FakeSurface {
    pub allow_thread_creation: bool,
    pub fail_history_reads: bool,
    pub state: Mutex<SurfaceState>,
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self {
            allow_thread_creation: true,
            fail_history_reads: false,
            state: Mutex::new(SurfaceState {
                next_id: 100,
                ..SurfaceState::default()
            }),
        }
    }
}

impl FakeSurface {
    /// Seed an existing thread under [`CHANNEL`] created `age` ago.
    pub fn seed_thread(&self, name: &str, age: Duration) -> u64 {
        let mut state = self.state.lock().expect("state lock");
        state.next_id += 1;
        let id = state.next_id;
        state.threads.push(ThreadHandle {
            id,
            name: name.into(),
            created_at: Utc::now() - age,
            parent_channel: CHANNEL,
        });
        id
    }

    /// Seed a message into a thread's history.
    pub fn seed_message(&self, thread: u64, from_bot: bool, content: &str) {
        let mut state = self.state.lock().expect("state lock");
        let id = u64::try_from(state.messages.values().map(Vec::len).sum::<usize>())
            .expect("message count fits")
            + 1000;
        state.messages.entry(thread).or_default().push(ThreadMessage {
            id,
            from_bot,
            content: content.into(),
            jump_link: format!("https://discord.com/channels/1/{thread}/{id}"),
        });
    }

    pub fn thread_count(&self) -> usize {
        self.state.lock().expect("state lock").threads.len()
    }

    pub fn posted_artifacts(&self) -> Vec<Artifact> {
        self.state
            .lock()
            .expect("state lock")
            .posted
            .iter()
            .map(|(_, artifact)| artifact.clone())
            .collect()
    }

    pub fn notes(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("state lock")
            .notes
            .iter()
            .map(|(_, note)| note.clone())
            .collect()
    }
}

impl ThreadSurface for FakeSurface {
    fn active_threads(
        &self,
        channel: u64,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ThreadHandle>, PublishError>> + Send + '_>> {
        Box::pin(async move {
            if channel != CHANNEL {
                return Err(PublishError::ChannelNotFound(format!(
                    "no channel {channel}"
                )));
            }
            let state = self.state.lock().expect("state lock");
            Ok(state
                .threads
                .iter()
                .filter(|thread| thread.parent_channel == channel)
                .cloned()
                .collect())
        })
    }

    fn can_create_threads(
        &self,
        channel: u64,
        _user: u64,
    ) -> Pin<Box<dyn Future<Output = Result<bool, PublishError>> + Send + '_>> {
        Box::pin(async move {
            if channel != CHANNEL {
                return Err(PublishError::ChannelNotFound(format!(
                    "no channel {channel}"
                )));
            }
            Ok(self.allow_thread_creation)
        })
    }

    fn create_thread(
        &self,
        channel: u64,
        name: &str,
    ) -> Pin<Box<dyn Future<Output = Result<ThreadHandle, PublishError>> + Send + '_>> {
        let name = name.to_owned();
        Box::pin(async move {
            let mut state = self.state.lock().expect("state lock");
            state.next_id += 1;
            let handle = ThreadHandle {
                id: state.next_id,
                name,
                created_at: Utc::now(),
                parent_channel: channel,
            };
            state.threads.push(handle.clone());
            Ok(handle)
        })
    }

    fn post_artifact(
        &self,
        thread: u64,
        artifact: &Artifact,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>> {
        let artifact = artifact.clone();
        Box::pin(async move {
            let mut state = self.state.lock().expect("state lock");
            state.posted.push((thread, artifact));
            Ok(())
        })
    }

    fn post_note(
        &self,
        thread: u64,
        text: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>> {
        let text = text.to_owned();
        Box::pin(async move {
            {
                let mut state = self.state.lock().expect("state lock");
                state.notes.push((thread, text.clone()));
            }
            self.seed_message(thread, true, &text);
            Ok(())
        })
    }

    fn recent_messages(
        &self,
        thread: u64,
        limit: u8,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ThreadMessage>, PublishError>> + Send + '_>> {
        Box::pin(async move {
            if self.fail_history_reads {
                return Err(PublishError::PlatformError("history unavailable".into()));
            }
            let state = self.state.lock().expect("state lock");
            let mut messages = state.messages.get(&thread).cloned().unwrap_or_default();
            messages.truncate(usize::from(limit));
            Ok(messages)
        })
    }
}

// ── Fake question source ────────────────────────────────

/// Scripted [`QuestionSource`]: queued responses are consumed in order,
/// an empty queue yields the sample success value. Counts every call.
#[derive(Default)]
pub struct FakeSource {
    pub question_responses: Mutex<VecDeque<Result<QuestionRecord, FetchError>>>,
    pub daily_responses: Mutex<VecDeque<Result<DailyChallenge, FetchError>>>,
    pub stats_responses: Mutex<VecDeque<Result<Option<CompanyStats>, FetchError>>>,
    pub similar_responses: Mutex<VecDeque<Result<Vec<SimilarQuestionRef>, FetchError>>>,
    pub fetch_calls: AtomicUsize,
}

impl FakeSource {
    pub fn total_fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl QuestionSource for FakeSource {
    fn fetch_question(
        &self,
        _slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<QuestionRecord, FetchError>> + Send + '_>> {
        Box::pin(async move {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            self.question_responses
                .lock()
                .expect("queue lock")
                .pop_front()
                .unwrap_or_else(|| Ok(sample_question()))
        })
    }

    fn fetch_daily(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<DailyChallenge, FetchError>> + Send + '_>> {
        Box::pin(async move {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            self.daily_responses
                .lock()
                .expect("queue lock")
                .pop_front()
                .unwrap_or_else(|| Ok(sample_daily()))
        })
    }

    fn fetch_company_stats(
        &self,
        _slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<CompanyStats>, FetchError>> + Send + '_>> {
        Box::pin(async move {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            self.stats_responses
                .lock()
                .expect("queue lock")
                .pop_front()
                .unwrap_or_else(|| Ok(Some(sample_stats())))
        })
    }

    fn fetch_similar(
        &self,
        _slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SimilarQuestionRef>, FetchError>> + Send + '_>> {
        Box::pin(async move {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            self.similar_responses
                .lock()
                .expect("queue lock")
                .pop_front()
                .unwrap_or_else(|| Ok(vec![sample_similar()]))
        })
    }
}
