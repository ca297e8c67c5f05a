use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SEMA_LLM_PROVIDER") {
            if let Ok(kind) = serde_json::from_value(serde_json::Value::String(v.clone())) {
                self.llm.provider = kind;
            } else {
                tracing::warn!("ignoring invalid SEMA_LLM_PROVIDER value: {v}");
            }
        }
        if let Ok(v) = std::env::var("SEMA_LLM_NAME") {
            self.llm.name = v;
        }
        if let Ok(v) = std::env::var("SEMA_LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("SEMA_LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("SEMA_LLM_EMBEDDING_MODEL") {
            self.llm.embedding_model = v;
        }
        if let Ok(v) = std::env::var("SEMA_LLM_MAX_TOKENS")
            && let Ok(tokens) = v.parse::<u32>()
        {
            self.llm.max_tokens = tokens;
        }
        if let Ok(v) = std::env::var("SEMA_LLM_TEMPERATURE")
            && let Ok(temperature) = v.parse::<f32>()
        {
            self.llm.temperature = temperature;
        }
        if let Ok(v) = std::env::var("SEMA_STORE_PATH") {
            self.store.path = v;
        }
        if let Ok(v) = std::env::var("SEMA_STORE_CHUNK_SIZE")
            && let Ok(size) = v.parse::<usize>()
        {
            self.store.chunk_size = size;
        }
        if let Ok(v) = std::env::var("SEMA_STORE_OVERLAP")
            && let Ok(overlap) = v.parse::<usize>()
        {
            self.store.overlap = overlap;
        }
        if let Ok(v) = std::env::var("SEMA_RETRIEVAL_TOP_K")
            && let Ok(top_k) = v.parse::<usize>()
        {
            self.retrieval.top_k = top_k;
        }
    }
}
