//! Session save/load with integrity verification
//!
//! A session is its stage plus the replay log. It is stored as a versioned
//! JSON envelope whose payload carries a BLAKE3 digest.

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::sim::{GameEventInput, Stage};

/// Current envelope version
pub const SESSION_VERSION: u32 = 1;

/// Everything needed to reproduce a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub stage: Stage,
    pub inputs: Vec<GameEventInput>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    /// BLAKE3 hex digest of `payload`
    digest: String,
    /// Serialized [`SessionRecord`]
    payload: String,
}

impl SessionRecord {
    pub fn new(stage: Stage, inputs: Vec<GameEventInput>) -> Self {
        Self { stage, inputs }
    }

    /// Wrap the session in a versioned, digested envelope
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        let payload = serde_json::to_string(self)?;
        let envelope = Envelope {
            version: SESSION_VERSION,
            digest: blake3::hash(payload.as_bytes()).to_hex().to_string(),
            payload,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    /// Parse and verify an envelope produced by [`SessionRecord::to_json`]
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let envelope: Envelope = serde_json::from_str(json)?;
        if envelope.version != SESSION_VERSION {
            return Err(PersistenceError::Version {
                found: envelope.version,
                expected: SESSION_VERSION,
            });
        }
        let digest = blake3::hash(envelope.payload.as_bytes());
        if digest.to_hex().as_str() != envelope.digest {
            return Err(PersistenceError::Digest);
        }

        let record: SessionRecord = serde_json::from_str(&envelope.payload)?;
        record.stage.validate()?;
        record.check_order()?;
        Ok(record)
    }

    /// Event times must never go backwards
    fn check_order(&self) -> Result<(), PersistenceError> {
        for (index, pair) in self.inputs.windows(2).enumerate() {
            if pair[1].event_time < pair[0].event_time {
                return Err(PersistenceError::NonMonotonic {
                    index: index + 1,
                    time: pair[1].event_time,
                    previous: pair[0].event_time,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StageSettings;
    use crate::sim::{Direction, GameInput};

    fn record() -> SessionRecord {
        SessionRecord::new(
            StageSettings::default().build(31337).unwrap(),
            vec![
                GameEventInput {
                    event_time: 100,
                    game_input: GameInput::turn(0, Direction::Up),
                },
                GameEventInput {
                    event_time: 500,
                    game_input: GameInput::speed(1),
                },
            ],
        )
    }

    #[test]
    fn test_save_and_load() {
        let json = record().to_json().unwrap();
        assert_eq!(SessionRecord::from_json(&json).unwrap(), record());
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let json = record().to_json().unwrap();
        let tampered = json.replace("31337", "31338");
        assert!(matches!(
            SessionRecord::from_json(&tampered),
            Err(PersistenceError::Digest)
        ));
    }

    #[test]
    fn test_wrong_version_is_rejected() {
        let json = record().to_json().unwrap();
        let future = json.replace("\"version\": 1", "\"version\": 9");
        assert!(matches!(
            SessionRecord::from_json(&future),
            Err(PersistenceError::Version { found: 9, .. })
        ));
    }

    #[test]
    fn test_out_of_order_log_is_rejected() {
        let mut rec = record();
        rec.inputs.swap(0, 1);
        let json = rec.to_json().unwrap();
        assert!(matches!(
            SessionRecord::from_json(&json),
            Err(PersistenceError::NonMonotonic {
                index: 1,
                time: 100,
                previous: 500
            })
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            SessionRecord::from_json("not json"),
            Err(PersistenceError::Json(_))
        ));
    }
}
