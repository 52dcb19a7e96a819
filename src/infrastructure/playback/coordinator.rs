//! Playback Coordinator - 单行对白的解析与播放编排
//!
//! 每次 Speak:
//! 1. Interrupt: 停止当前输出，取消尚未完成的解析
//! 2. 音色解析 → 构建 content key → 内存/磁盘查找
//! 3. 未命中时异步调用合成服务，成功后写盘、写内存
//! 4. 播放；所有层都失败时记录一次警告并回到 Idle
//!
//! Speak 调用通过 `current` 互斥锁串行化。所有副作用（写盘、写内存、播放）
//! 都在持锁且确认 ticket 仍有效之后才提交，过期的结果不会产生任何可观察效果。

use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::application::ports::{
    AudioOutputPort, AudioStorePort, Credential, SynthesisError, SynthesisPort,
};
use crate::application::{AudioSource, PlaybackState, ResolveError, SpeakOutcome};
use crate::config::AppConfig;
use crate::domain::{
    AudioClip, ContentKey, DialogueLine, RequestKeyBuilder, SpeakerId, VoiceProfileResolver,
};
use crate::infrastructure::adapters::{FileAudioStore, HttpSynthesisClient};
use crate::infrastructure::cache::{CacheLookup, CacheStats, TieredAudioCache};
use crate::infrastructure::events::{EventPublisher, PlaybackEvent};

/// 当前正在处理的请求
struct Current {
    state: PlaybackState,
    generation: u64,
    request_id: Option<Uuid>,
    token: CancellationToken,
}

/// 单次解析的身份
struct Ticket {
    request_id: Uuid,
    generation: u64,
    token: CancellationToken,
}

impl Ticket {
    fn is_current(&self, current: &Current) -> bool {
        current.generation == self.generation && !self.token.is_cancelled()
    }
}

struct Shared {
    resolver: Arc<VoiceProfileResolver>,
    key_builder: RequestKeyBuilder,
    cache: Arc<TieredAudioCache>,
    synthesizer: Arc<dyn SynthesisPort>,
    output: Arc<dyn AudioOutputPort>,
    credential: Option<Credential>,
    events: Arc<EventPublisher>,
    current: Mutex<Current>,
}

/// Speak 的句柄
///
/// 丢弃句柄不会取消解析；只有下一次 Speak 或 interrupt 会取消
pub struct SpeakHandle {
    request_id: Option<Uuid>,
    join: Option<JoinHandle<SpeakOutcome>>,
}

impl SpeakHandle {
    fn skipped() -> Self {
        Self {
            request_id: None,
            join: None,
        }
    }

    /// 空文本时为 None
    pub fn request_id(&self) -> Option<Uuid> {
        self.request_id
    }

    /// 等待这一行的最终结果
    pub async fn outcome(self) -> SpeakOutcome {
        match self.join {
            None => SpeakOutcome::Skipped,
            Some(join) => match join.await {
                Ok(outcome) => outcome,
                Err(e) => SpeakOutcome::Failed(ResolveError::Internal(e.to_string())),
            },
        }
    }
}

/// 播放协调器
///
/// 由宿主应用构建一次并按引用传递；克隆共享同一个实例
#[derive(Clone)]
pub struct PlaybackCoordinator {
    shared: Arc<Shared>,
}

impl PlaybackCoordinator {
    pub fn new(
        resolver: Arc<VoiceProfileResolver>,
        key_builder: RequestKeyBuilder,
        cache: Arc<TieredAudioCache>,
        synthesizer: Arc<dyn SynthesisPort>,
        output: Arc<dyn AudioOutputPort>,
        credential: Option<Credential>,
        events: Arc<EventPublisher>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                resolver,
                key_builder,
                cache,
                synthesizer,
                output,
                credential,
                events,
                current: Mutex::new(Current {
                    state: PlaybackState::Idle,
                    generation: 0,
                    request_id: None,
                    token: CancellationToken::new(),
                }),
            }),
        }
    }

    /// 按配置组装完整的协调器：磁盘缓存、凭证、HTTP 合成客户端
    ///
    /// 缺少凭证不是错误，网络层将始终返回 ConfigurationMissing
    pub async fn from_config(
        config: &AppConfig,
        output: Arc<dyn AudioOutputPort>,
    ) -> anyhow::Result<Self> {
        let store = Arc::new(FileAudioStore::new(config.cache.disk_store_config()).await?);

        let credential = match store.load_credential().await {
            Ok(Some(credential)) => Some(credential),
            Ok(None) => {
                tracing::warn!(
                    path = %store.credential_path().display(),
                    "No API key file detected, synthesis is disabled. Create the file with the API key as its contents"
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read API key file, synthesis is disabled");
                None
            }
        };

        let synthesizer = Arc::new(HttpSynthesisClient::new(config.synthesis.client_config())?);
        let cache = TieredAudioCache::new(store).arc();

        Ok(Self::new(
            Arc::new(config.voices.resolver()),
            RequestKeyBuilder::new(config.synthesis.audio_encoding.clone()),
            cache,
            synthesizer,
            output,
            credential,
            EventPublisher::new().arc(),
        ))
    }

    /// 说出一行对白
    ///
    /// 先打断当前的解析与播放，再开始新的解析。空文本只打断，不做任何查找。
    pub async fn speak(&self, line: DialogueLine) -> SpeakHandle {
        let mut current = self.shared.current.lock().await;
        self.shared.interrupt_locked(&mut current);

        if line.is_blank() {
            tracing::debug!("Blank line, nothing to speak");
            return SpeakHandle::skipped();
        }

        let ticket = Ticket {
            request_id: Uuid::new_v4(),
            generation: current.generation + 1,
            token: CancellationToken::new(),
        };
        current.generation = ticket.generation;
        current.request_id = Some(ticket.request_id);
        current.token = ticket.token.clone();
        current.state = PlaybackState::Resolving;

        self.shared
            .events
            .publish_resolving(ticket.request_id, line.speaker().map(SpeakerId::as_str));

        let request_id = ticket.request_id;
        let span = tracing::info_span!("speak", request_id = %request_id);
        let shared = self.shared.clone();
        let join = tokio::spawn(async move { shared.resolve(line, ticket).await }.instrument(span));

        SpeakHandle {
            request_id: Some(request_id),
            join: Some(join),
        }
    }

    /// 停止当前输出并取消未完成的解析
    pub async fn interrupt(&self) {
        let mut current = self.shared.current.lock().await;
        self.shared.interrupt_locked(&mut current);
    }

    pub async fn state(&self) -> PlaybackState {
        self.shared.current.lock().await.state
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.shared.events.subscribe()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.shared.cache.stats()
    }

    pub fn has_credential(&self) -> bool {
        self.shared.credential.is_some()
    }
}

impl Shared {
    fn interrupt_locked(&self, current: &mut Current) {
        current.token.cancel();
        self.output.stop();

        if current.state != PlaybackState::Idle {
            if let Some(request_id) = current.request_id {
                tracing::debug!(request_id = %request_id, state = ?current.state, "Interrupted");
                self.events.publish_interrupted(request_id);
            }
        }
        current.state = PlaybackState::Idle;
    }

    async fn resolve(self: Arc<Self>, line: DialogueLine, ticket: Ticket) -> SpeakOutcome {
        let profile = self.resolver.resolve(line.speaker());
        let request = match self.key_builder.build_key(line.text(), profile) {
            Ok(request) => request,
            Err(e) => return self.fail(&ticket, None, e.into()).await,
        };
        let key = request.key().clone();

        tracing::debug!(
            content_key = %key,
            speaker = ?line.speaker().map(SpeakerId::as_str),
            voice = %profile.voice_name,
            "Resolving line"
        );

        if let CacheLookup::Hit { clip, source } = self.cache.lookup(&key).await {
            let mut current = self.current.lock().await;
            if !ticket.is_current(&current) {
                return SpeakOutcome::Superseded;
            }
            return self.start_playback(&mut current, &ticket, key, clip, source);
        }

        let fetched = tokio::select! {
            biased;
            _ = ticket.token.cancelled() => {
                tracing::debug!(content_key = %key, "Synthesis cancelled by a newer line");
                return SpeakOutcome::Superseded;
            }
            result = self.synthesizer.synthesize(request.payload(), self.credential.as_ref()) => result,
        };

        let audio = match fetched {
            Ok(audio) => audio,
            Err(e) => return self.fail(&ticket, Some(&key), e.into()).await,
        };

        let mut current = self.current.lock().await;
        if !ticket.is_current(&current) {
            tracing::debug!(content_key = %key, "Discarding stale synthesis result");
            return SpeakOutcome::Superseded;
        }

        match self.cache.store(&key, audio).await {
            Ok(clip) => {
                self.start_playback(&mut current, &ticket, key, clip, AudioSource::Network)
            }
            Err(e) => {
                let err = SynthesisError::MalformedResponse(format!("audio is not playable: {}", e));
                self.fail_locked(&mut current, &ticket, Some(&key), err.into())
            }
        }
    }

    fn start_playback(
        self: &Arc<Self>,
        current: &mut Current,
        ticket: &Ticket,
        key: ContentKey,
        clip: Arc<AudioClip>,
        source: AudioSource,
    ) -> SpeakOutcome {
        if let Err(e) = self.output.play(&key, clip.clone()) {
            return self.fail_locked(current, ticket, Some(&key), e.into());
        }

        current.state = PlaybackState::Playing;
        let duration_ms = clip.info().duration_ms;
        self.events
            .publish_playing(ticket.request_id, &key, source, duration_ms);
        tracing::info!(content_key = %key, source = %source, duration_ms, "Playing line");

        let shared = Arc::clone(self);
        let token = ticket.token.clone();
        let generation = ticket.generation;
        let request_id = ticket.request_id;
        let duration = clip.duration();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(duration) => shared.finish(generation, request_id).await,
            }
        });

        SpeakOutcome::Played { key, source }
    }

    /// 自然播放结束
    async fn finish(&self, generation: u64, request_id: Uuid) {
        let mut current = self.current.lock().await;
        if current.generation == generation
            && current.state == PlaybackState::Playing
            && !current.token.is_cancelled()
        {
            current.state = PlaybackState::Idle;
            self.events.publish_finished(request_id);
            tracing::debug!(request_id = %request_id, "Playback finished");
        }
    }

    async fn fail(&self, ticket: &Ticket, key: Option<&ContentKey>, err: ResolveError) -> SpeakOutcome {
        let mut current = self.current.lock().await;
        self.fail_locked(&mut current, ticket, key, err)
    }

    fn fail_locked(
        &self,
        current: &mut Current,
        ticket: &Ticket,
        key: Option<&ContentKey>,
        err: ResolveError,
    ) -> SpeakOutcome {
        if !ticket.is_current(current) {
            tracing::debug!(error = %err, "Stale line failed, ignoring");
            return SpeakOutcome::Superseded;
        }

        current.state = PlaybackState::Idle;
        tracing::warn!(
            content_key = key.map(ContentKey::as_str).unwrap_or("-"),
            tier = err.tier(),
            error = %err,
            "Unable to resolve audio from memory, disk or synthesis service"
        );
        self.events.publish_failed(ticket.request_id, &err.to_string());
        SpeakOutcome::Failed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::test_wav;
    use crate::domain::VoiceProfile;
    use crate::infrastructure::adapters::{
        DiskStoreConfig, FakeResponse, FakeSynthesisClient, SilentAudioOutput,
    };
    use std::path::Path;
    use std::time::Duration;
    use tempfile::tempdir;
    use tokio::sync::Notify;

    /// 收集日志输出，用于断言警告次数
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct Harness {
        coordinator: PlaybackCoordinator,
        synth: Arc<FakeSynthesisClient>,
        output: Arc<SilentAudioOutput>,
        store: Arc<FileAudioStore>,
        cache: Arc<TieredAudioCache>,
    }

    fn resolver() -> VoiceProfileResolver {
        VoiceProfileResolver::new(VoiceProfile::new("en-US-Wavenet-A"))
            .with_profile("Milton", VoiceProfile::new("en-GB-Wavenet-B"))
            .with_profile("Stella", VoiceProfile::new("en-US-Wavenet-F"))
    }

    fn key_for(line: &DialogueLine) -> ContentKey {
        let resolver = resolver();
        RequestKeyBuilder::default()
            .build_key(line.text(), resolver.resolve(line.speaker()))
            .unwrap()
            .key()
            .clone()
    }

    async fn harness(dir: &Path, synth: FakeSynthesisClient, credential: Option<&str>) -> Harness {
        let store = Arc::new(
            FileAudioStore::new(DiskStoreConfig {
                cache_dir: dir.to_path_buf(),
                ..Default::default()
            })
            .await
            .unwrap(),
        );
        let cache = TieredAudioCache::new(store.clone()).arc();
        let synth = Arc::new(synth);
        let output = SilentAudioOutput::new().arc();

        let coordinator = PlaybackCoordinator::new(
            Arc::new(resolver()),
            RequestKeyBuilder::default(),
            cache.clone(),
            synth.clone(),
            output.clone(),
            credential.and_then(Credential::new),
            EventPublisher::new().arc(),
        );

        Harness {
            coordinator,
            synth,
            output,
            store,
            cache,
        }
    }

    async fn next_event(rx: &mut broadcast::Receiver<PlaybackEvent>) -> PlaybackEvent {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_network_fetch_then_memory_hit() {
        let dir = tempdir().unwrap();
        let h = harness(dir.path(), FakeSynthesisClient::new(test_wav(5_000)), Some("key")).await;

        let line = DialogueLine::spoken_by("Hello there.", "Milton");
        let key = key_for(&line);

        let first = h.coordinator.speak(line.clone()).await.outcome().await;
        match &first {
            SpeakOutcome::Played { key: played, source } => {
                assert_eq!(played, &key);
                assert_eq!(*source, AudioSource::Network);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(h.coordinator.state().await, PlaybackState::Playing);
        assert_eq!(h.store.load(&key).await.unwrap(), Some(test_wav(5_000)));

        let second = h.coordinator.speak(line).await.outcome().await;
        assert_eq!(second.source(), Some(AudioSource::Memory));
        assert_eq!(h.synth.calls(), 1);
        assert_eq!(h.output.history(), vec![key.clone(), key]);
    }

    #[tokio::test]
    async fn test_disk_hit_from_previous_run() {
        let dir = tempdir().unwrap();
        let line = DialogueLine::spoken_by("Good evening.", "Stella");
        {
            let h = harness(dir.path(), FakeSynthesisClient::new(test_wav(10)), Some("key")).await;
            assert!(h.coordinator.speak(line.clone()).await.outcome().await.is_played());
        }

        let h = harness(dir.path(), FakeSynthesisClient::new(test_wav(10)), Some("key")).await;
        let outcome = h.coordinator.speak(line).await.outcome().await;
        assert_eq!(outcome.source(), Some(AudioSource::Disk));
        assert_eq!(h.synth.calls(), 0);
        assert_eq!(h.coordinator.cache_stats().disk_hits, 1);
    }

    #[tokio::test]
    async fn test_blank_line_is_a_no_op() {
        let dir = tempdir().unwrap();
        let h = harness(dir.path(), FakeSynthesisClient::new(test_wav(10)), Some("key")).await;

        for text in ["", "   \t\n"] {
            let handle = h.coordinator.speak(DialogueLine::narration(text)).await;
            assert!(handle.request_id().is_none());
            assert!(matches!(handle.outcome().await, SpeakOutcome::Skipped));
        }

        assert_eq!(h.synth.calls(), 0);
        assert!(h.output.history().is_empty());
        assert_eq!(h.coordinator.cache_stats(), CacheStats::default());
        assert_eq!(h.coordinator.state().await, PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_missing_credential_ends_idle_without_audio() {
        let dir = tempdir().unwrap();
        let h = harness(dir.path(), FakeSynthesisClient::new(test_wav(10)), None).await;
        assert!(!h.coordinator.has_credential());

        let line = DialogueLine::spoken_by("Hello there.", "Milton");
        let outcome = h.coordinator.speak(line.clone()).await.outcome().await;
        match outcome {
            SpeakOutcome::Failed(err) => assert!(err.is_configuration_missing()),
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert_eq!(h.coordinator.state().await, PlaybackState::Idle);
        assert_eq!(h.synth.calls(), 0);
        assert!(h.output.history().is_empty());
        assert_eq!(h.store.load(&key_for(&line)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_newer_line_supersedes_pending_fetch() {
        let dir = tempdir().unwrap();
        let gate = Arc::new(Notify::new());
        let synth = FakeSynthesisClient::new(test_wav(5_000))
            .then(FakeResponse::Gated { gate: gate.clone() })
            .then(FakeResponse::Audio {
                delay: Duration::ZERO,
            });
        let h = harness(dir.path(), synth, Some("key")).await;

        let line_a = DialogueLine::spoken_by("First line.", "Milton");
        let line_b = DialogueLine::spoken_by("Second line.", "Stella");
        let (key_a, key_b) = (key_for(&line_a), key_for(&line_b));

        let handle_a = h.coordinator.speak(line_a).await;
        // A 的请求已发出并挂起
        while h.synth.calls() == 0 {
            tokio::task::yield_now().await;
        }
        let handle_b = h.coordinator.speak(line_b).await;

        let outcome_b = handle_b.outcome().await;
        assert_eq!(outcome_b.source(), Some(AudioSource::Network));
        assert!(matches!(handle_a.outcome().await, SpeakOutcome::Superseded));

        // A 的请求已被丢弃，放行 gate 也不会再产生结果
        gate.notify_one();
        tokio::task::yield_now().await;

        assert_eq!(h.synth.calls(), 2);
        assert_eq!(h.synth.completed(), 1);
        assert_eq!(h.output.history(), vec![key_b.clone()]);
        assert_eq!(h.store.load(&key_a).await.unwrap(), None);
        assert!(!h.cache.contains_in_memory(&key_a));
        assert!(h.cache.contains_in_memory(&key_b));
        assert_eq!(h.coordinator.state().await, PlaybackState::Playing);
    }

    #[tokio::test]
    async fn test_disk_write_failure_still_plays() {
        let dir = tempdir().unwrap();
        let cache_dir = dir.path().join("cache");
        let h = harness(&cache_dir, FakeSynthesisClient::new(test_wav(5_000)), Some("key")).await;

        std::fs::remove_dir(&cache_dir).unwrap();
        std::fs::write(&cache_dir, b"not a directory").unwrap();

        let line = DialogueLine::spoken_by("Hello there.", "Milton");
        let key = key_for(&line);
        let outcome = h.coordinator.speak(line.clone()).await.outcome().await;

        assert_eq!(outcome.source(), Some(AudioSource::Network));
        assert_eq!(h.coordinator.state().await, PlaybackState::Playing);
        assert_eq!(h.output.history(), vec![key.clone()]);
        assert!(h.cache.contains_in_memory(&key));

        // 本进程内后续由内存层提供
        let again = h.coordinator.speak(line).await.outcome().await;
        assert_eq!(again.source(), Some(AudioSource::Memory));
        assert_eq!(h.synth.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_line_logs_exactly_one_warning() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let dir = tempdir().unwrap();
        let h = harness(dir.path(), FakeSynthesisClient::new(test_wav(10)), None).await;

        // 磁盘层有一个损坏的条目，网络层缺少凭证：三层全部失败
        let line = DialogueLine::spoken_by("Hello there.", "Milton");
        h.store.save(&key_for(&line), b"not a wav").await.unwrap();

        let outcome = h.coordinator.speak(line).await.outcome().await;
        assert!(matches!(outcome, SpeakOutcome::Failed(_)));

        let output = logs.contents();
        let warnings: Vec<&str> = output.lines().filter(|l| l.contains(" WARN ")).collect();
        assert_eq!(warnings.len(), 1, "logs:\n{}", output);
        assert!(warnings[0].contains("Unable to resolve audio from memory, disk or synthesis service"));
        assert!(warnings[0].contains("tier=\"network\""), "{}", warnings[0]);
        assert!(output.contains("Cached audio is not playable"));
    }

    #[tokio::test]
    async fn test_service_failure_ends_idle() {
        let dir = tempdir().unwrap();
        let synth = FakeSynthesisClient::new(test_wav(10)).then(FakeResponse::HttpStatus {
            delay: Duration::ZERO,
            status: 500,
        });
        let h = harness(dir.path(), synth, Some("key")).await;
        let mut events = h.coordinator.subscribe();

        let handle = h
            .coordinator
            .speak(DialogueLine::narration("The wind howls."))
            .await;
        let request_id = handle.request_id().unwrap();
        let outcome = handle.outcome().await;

        assert!(matches!(
            outcome,
            SpeakOutcome::Failed(ResolveError::Synthesis(SynthesisError::HttpStatus {
                status: 500,
                ..
            }))
        ));
        assert_eq!(h.coordinator.state().await, PlaybackState::Idle);
        assert!(matches!(next_event(&mut events).await, PlaybackEvent::Resolving { .. }));
        let failed = next_event(&mut events).await;
        assert!(matches!(failed, PlaybackEvent::Failed { .. }));
        assert_eq!(failed.request_id(), request_id);
    }

    #[tokio::test]
    async fn test_unplayable_audio_is_malformed_and_not_persisted() {
        let dir = tempdir().unwrap();
        let h = harness(dir.path(), FakeSynthesisClient::new(b"garbage".to_vec()), Some("key")).await;

        let line = DialogueLine::narration("Static.");
        let outcome = h.coordinator.speak(line.clone()).await.outcome().await;

        assert!(matches!(
            outcome,
            SpeakOutcome::Failed(ResolveError::Synthesis(SynthesisError::MalformedResponse(_)))
        ));
        assert_eq!(h.store.load(&key_for(&line)).await.unwrap(), None);
        assert!(h.output.history().is_empty());
    }

    #[tokio::test]
    async fn test_playback_finishes_naturally() {
        let dir = tempdir().unwrap();
        let h = harness(dir.path(), FakeSynthesisClient::new(test_wav(50)), Some("key")).await;
        let mut events = h.coordinator.subscribe();

        let handle = h.coordinator.speak(DialogueLine::narration("Short.")).await;
        let request_id = handle.request_id().unwrap();
        assert!(handle.outcome().await.is_played());

        assert!(matches!(next_event(&mut events).await, PlaybackEvent::Resolving { .. }));
        assert!(matches!(next_event(&mut events).await, PlaybackEvent::Playing { .. }));
        assert_eq!(
            next_event(&mut events).await,
            PlaybackEvent::Finished { request_id }
        );
        assert_eq!(h.coordinator.state().await, PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_interrupt_stops_playback() {
        let dir = tempdir().unwrap();
        let h = harness(dir.path(), FakeSynthesisClient::new(test_wav(10_000)), Some("key")).await;
        let mut events = h.coordinator.subscribe();

        let handle = h.coordinator.speak(DialogueLine::narration("A long speech.")).await;
        let request_id = handle.request_id().unwrap();
        assert!(handle.outcome().await.is_played());
        assert!(h.output.current().is_some());

        h.coordinator.interrupt().await;

        assert_eq!(h.coordinator.state().await, PlaybackState::Idle);
        assert!(h.output.current().is_none());
        assert!(matches!(next_event(&mut events).await, PlaybackEvent::Resolving { .. }));
        assert!(matches!(next_event(&mut events).await, PlaybackEvent::Playing { .. }));
        assert_eq!(
            next_event(&mut events).await,
            PlaybackEvent::Interrupted { request_id }
        );
    }
}
