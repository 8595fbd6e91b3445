//! Shared application state, built once at startup and cloned (cheaply,
//! via `Arc`) into every request handler: corpus, normaliser, embedder,
//! memory, review queue, pending cache, and resolver config.

use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use intent_corpus::Corpus;
use intent_crm::CrmConfig;
use intent_embed::{Embedder, EmbedderConfig};
use intent_feedback::{
    FeedbackManager, JsonLinesQueueBackend, NullQueueBackend, PendingCache, PendingCacheConfig,
    ReviewQueue, SharedLearningStats,
};
use intent_memory::{EvictionPolicy, FastMemory, JsonLinesBackend, ModelMismatchPolicy, NullBackend};
use intent_normalize::SlangMap;
use intent_resolver::{RandomRequestIds, Resolver, ResolverConfig};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

pub struct ServerState {
    pub config: Arc<ServerConfig>,
    pub corpus: Arc<Corpus>,
    pub embedder: Arc<Embedder>,
    pub slang: Arc<SlangMap>,
    pub memory: Arc<FastMemory>,
    pub pending: Arc<PendingCache>,
    pub review_queue: Arc<ReviewQueue>,
    pub stats: Arc<SharedLearningStats>,
    pub crm_config: CrmConfig,
    pub resolver_config: ResolverConfig,
    pub request_ids: Arc<RandomRequestIds>,
    ready: Arc<AtomicBool>,
    start_time: Instant,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let embedder = Embedder::new(EmbedderConfig::default());

        let slang = match &config.slang_path {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .map_err(|e| ServerError::Config(format!("reading slang map '{path}': {e}")))?;
                SlangMap::from_json_str(&json)
                    .map_err(|e| ServerError::Config(format!("parsing slang map '{path}': {e}")))?
            }
            None => SlangMap::empty(),
        };

        let corpus_json = fs::read_to_string(&config.corpus_path).map_err(|e| {
            ServerError::Config(format!("reading corpus '{}': {e}", config.corpus_path))
        })?;
        let corpus = Corpus::load(&corpus_json, &embedder)?;

        let memory_backend: Box<dyn intent_memory::MemoryBackend> = match &config.golden_record_path {
            Some(path) => Box::new(JsonLinesBackend::new(path)),
            None => Box::new(NullBackend),
        };
        let model_sidecar = config
            .golden_record_path
            .as_ref()
            .map(|path| std::path::PathBuf::from(format!("{path}.model")));
        let mismatch_policy = match config.model_mismatch_policy.as_str() {
            "clear" => ModelMismatchPolicy::Clear,
            _ => ModelMismatchPolicy::FailFast,
        };
        let memory = FastMemory::load_with_model_check(
            memory_backend,
            EvictionPolicy::Unbounded,
            model_sidecar.as_deref(),
            embedder.model_id(),
            mismatch_policy,
        )
        .map_err(|e| match e {
            intent_memory::MemoryError::ModelMismatch { .. } => {
                ServerError::Config(format!("fast memory invalidated at startup: {e}"))
            }
            other => ServerError::Internal(format!("loading fast memory: {other}")),
        })?;

        let queue_backend: Box<dyn intent_feedback::QueueBackend> = match &config.review_queue_path {
            Some(path) => Box::new(JsonLinesQueueBackend::new(path)),
            None => Box::new(NullQueueBackend),
        };
        let review_queue = ReviewQueue::new(queue_backend)
            .map_err(|e| ServerError::Internal(format!("loading review queue: {e}")))?;

        let pending = PendingCache::new(PendingCacheConfig {
            ttl: std::time::Duration::from_secs(config.pending_cache_ttl_secs),
            max_capacity: config.pending_cache_capacity,
        });

        let resolver_config = ResolverConfig {
            k_mem: config.k_mem,
            k_stage1: config.k_stage1,
            alpha: config.alpha,
            theta: config.theta,
        };

        Ok(Self {
            config: Arc::new(config),
            corpus: Arc::new(corpus),
            embedder: Arc::new(embedder),
            slang: Arc::new(slang),
            memory: Arc::new(memory),
            pending: Arc::new(pending),
            review_queue: Arc::new(review_queue),
            stats: Arc::new(SharedLearningStats::new()),
            crm_config: CrmConfig::default(),
            resolver_config,
            request_ids: Arc::new(RandomRequestIds),
            ready: Arc::new(AtomicBool::new(true)),
            start_time: Instant::now(),
        })
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver {
            corpus: &self.corpus,
            memory: &self.memory,
            embedder: &self.embedder,
            slang: &self.slang,
            crm_config: self.crm_config,
            resolver_config: self.resolver_config,
            request_ids: self.request_ids.as_ref(),
        }
    }

    pub fn feedback_manager(&self) -> FeedbackManager<'_> {
        FeedbackManager {
            corpus: &self.corpus,
            memory: &self.memory,
            pending: &self.pending,
            review_queue: &self.review_queue,
            stats: &self.stats,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }
}
