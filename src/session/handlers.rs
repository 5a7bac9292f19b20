use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use super::notice::{Notice, Outcome};
use super::state::EchoSession;
use crate::audio::{synthesize, ResonanceParams};
use crate::journal::{render_trend, LogRow, LogTable, SessionLog, TrendSeries};
use crate::oracle::{ApiKey, InsightRequest, OracleClient};
use crate::scoring::{Ratings, Score, StateScorer};
use crate::settings::{EchoSettings, WaveSettings};
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Summary of a synthesized tone; the WAV bytes themselves live on the session.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToneInfo {
    pub duration_secs: f64,
    pub beat_hz: f64,
    pub left_hz: f64,
    pub right_hz: f64,
    pub frames: usize,
    pub wav_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub row: LogRow,
    pub table: LogTable,
    pub trend: TrendSeries,
    /// Set when the previous log had to be discarded.
    pub notice: Option<Notice>,
}

/// The request/response core behind the UI.
///
/// Every handler takes the session by value and hands it back. When a handler
/// fails the session comes back exactly as it went in.
pub struct EchoCore {
    scorer: StateScorer,
    log: SessionLog,
    oracle: Option<OracleClient>,
}

impl EchoCore {
    pub fn new(scorer: StateScorer, log: SessionLog, oracle: Option<OracleClient>) -> Self {
        Self {
            scorer,
            log,
            oracle,
        }
    }

    /// Wire the core from settings. Without a key the insight handler reports a notice.
    pub fn from_settings(settings: &EchoSettings, api_key: Option<ApiKey>) -> Self {
        let oracle = api_key.and_then(|key| match OracleClient::new(&settings.oracle, key) {
            Ok(client) => Some(client),
            Err(err) => {
                log_warn!("Insight service unavailable: {err}");
                None
            }
        });

        Self::new(
            StateScorer::default(),
            SessionLog::open(settings.log_path.clone()),
            oracle,
        )
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn scorer(&self) -> &StateScorer {
        &self.scorer
    }

    /// Score the sliders and remember both ratings and score on the session.
    pub fn rate<R: Rng + ?Sized>(
        &self,
        mut session: EchoSession,
        ratings: Ratings,
        rng: &mut R,
    ) -> (EchoSession, Score) {
        let score = self.scorer.score(&ratings, rng);
        session.ratings = Some(ratings);
        session.score = Some(score);
        (session, score)
    }

    /// Synthesize the selected wave, scaled by the session's meta-awareness rating.
    pub fn activate_wave(
        &self,
        mut session: EchoSession,
        wave: &WaveSettings,
    ) -> (EchoSession, Outcome<ToneInfo>) {
        let params = ResonanceParams::new(
            wave.session_length_secs as f64,
            wave.beat_hz(),
            wave.harmonic_boost,
            session.ratings_or_default().meta_awareness,
        );

        let buffer = match synthesize(&params) {
            Ok(buffer) => buffer,
            Err(err) => return (session, Err(err.into())),
        };
        if let Err(err) = buffer.ensure_audible() {
            return (session, Err(err.into()));
        }

        let wav = match buffer.to_wav_bytes() {
            Ok(wav) => wav,
            Err(err) => return (session, Err(err.into())),
        };
        let info = ToneInfo {
            duration_secs: params.duration_secs,
            beat_hz: params.beat_hz,
            left_hz: params.left_hz(),
            right_hz: params.right_hz(),
            frames: buffer.frames(),
            wav_bytes: wav.len(),
        };
        log_info!(
            "Synthesized {:.0}s tone: {:.2} Hz / {:.2} Hz",
            info.duration_secs,
            info.left_hz,
            info.right_hz
        );

        session.tone = Some(wav);
        (session, Ok(info))
    }

    /// Append a journal row using the session's current Φ as the pre score.
    pub fn write_journal<R: Rng + ?Sized>(
        &self,
        mut session: EchoSession,
        note: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> (EchoSession, Outcome<JournalEntry>) {
        let Some(score) = session.score else {
            return (
                session,
                Err(Notice::info("Rate your state before writing a journal entry")),
            );
        };

        let pre = score.awareness_proxy;
        let row = LogRow::new(now, pre, self.scorer.post_score(pre, rng), note);

        let appended = match self.log.append(row.clone()) {
            Ok(appended) => appended,
            Err(err) => {
                log_warn!("Journal write failed: {err:#}");
                return (session, Err(err.into()));
            }
        };

        session.streak += 1;
        let trend = render_trend(&appended.table);
        let entry = JournalEntry {
            row,
            table: appended.table,
            trend,
            notice: appended.recovered_from.map(Notice::from),
        };
        (session, Ok(entry))
    }

    /// Ask the text-generation service for a reflection on the current state.
    pub async fn request_insight(
        &self,
        mut session: EchoSession,
        transcript: Option<&str>,
    ) -> (EchoSession, Outcome<String>) {
        let Some(oracle) = &self.oracle else {
            return (
                session,
                Err(Notice::warning("No API key configured; insights are unavailable")),
            );
        };

        let request = InsightRequest::new(session.ratings_or_default(), session.score, transcript);
        match oracle.generate(&request.prompt()).await {
            Ok(text) => {
                session.insight = Some(text.clone());
                (session, Ok(text))
            }
            Err(err) => (session, Err(err.into())),
        }
    }

    /// Current trend of post-session Φ from the persisted log.
    pub fn trend(&self) -> TrendSeries {
        render_trend(&self.log.load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::WaveMode;
    use crate::session::NoticeLevel;
    use rand::{rngs::StdRng, SeedableRng};

    fn core_in(dir: &tempfile::TempDir) -> EchoCore {
        EchoCore::new(
            StateScorer::default(),
            SessionLog::open(dir.path().join("log.csv")),
            None,
        )
    }

    #[test]
    fn rate_stores_ratings_and_score() {
        let dir = tempfile::tempdir().unwrap();
        let core = core_in(&dir);
        let mut rng = StdRng::seed_from_u64(11);

        let ratings = Ratings::new(7, 7, 7, 7);
        let (session, score) = core.rate(EchoSession::new(), ratings, &mut rng);
        assert_eq!(session.ratings, Some(ratings));
        assert_eq!(session.score, Some(score));
        assert_eq!(score.coherence, 1.0);
    }

    #[test]
    fn activate_wave_keeps_tone_on_session() {
        let dir = tempfile::tempdir().unwrap();
        let core = core_in(&dir);
        let wave = WaveSettings {
            mode: WaveMode::AlphaRelax,
            session_length_secs: 1,
            harmonic_boost: false,
            custom_beat_hz: None,
        };

        let (session, outcome) = core.activate_wave(EchoSession::new(), &wave);
        let info = outcome.unwrap();
        assert_eq!(info.frames, 44100);
        assert_eq!(info.beat_hz, 10.0);
        assert_eq!(session.tone.as_ref().map(Vec::len), Some(info.wav_bytes));
    }

    #[test]
    fn zero_length_wave_is_a_notice() {
        let dir = tempfile::tempdir().unwrap();
        let core = core_in(&dir);
        let wave = WaveSettings {
            session_length_secs: 0,
            ..WaveSettings::default()
        };

        let before = EchoSession::new();
        let (after, outcome) = core.activate_wave(before.clone(), &wave);
        let notice = outcome.unwrap_err();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("positive"));
        assert_eq!(after, before);
    }

    #[test]
    fn journal_requires_a_score() {
        let dir = tempfile::tempdir().unwrap();
        let core = core_in(&dir);
        let mut rng = StdRng::seed_from_u64(5);

        let (session, outcome) = core.write_journal(EchoSession::new(), "hi", Utc::now(), &mut rng);
        assert_eq!(outcome.unwrap_err().level, NoticeLevel::Info);
        assert_eq!(session.streak, 0);
        assert!(core.log().load().is_empty());
    }

    #[test]
    fn journal_appends_and_bumps_streak() {
        let dir = tempfile::tempdir().unwrap();
        let core = core_in(&dir);
        let mut rng = StdRng::seed_from_u64(5);

        let (session, _) = core.rate(EchoSession::new(), Ratings::new(6, 5, 8, 9), &mut rng);
        let (session, first) = core.write_journal(session, "morning", Utc::now(), &mut rng);
        let (session, second) = core.write_journal(session, "evening", Utc::now(), &mut rng);

        let first = first.unwrap();
        let second = second.unwrap();
        assert_eq!(session.streak, 2);
        assert!(first.notice.is_none());
        assert_eq!(second.table.len(), 2);
        assert_eq!(second.trend.values(), vec![first.row.post_phi, second.row.post_phi]);
        assert_eq!(core.trend(), second.trend);
    }

    #[tokio::test]
    async fn insight_without_key_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let core = core_in(&dir);
        let before = EchoSession::new();

        let (after, outcome) = core.request_insight(before.clone(), None).await;
        assert_eq!(outcome.unwrap_err().level, NoticeLevel::Warning);
        assert_eq!(after, before);
    }
}
