//! The persisted high score
//!
//! A single number in a plain text file. A missing or malformed file is
//! rewritten as zero, and a stored value above the in-game score cap can
//! only have been edited by hand, which the menu calls out.

use std::fs;
use std::path::PathBuf;

use crate::consts::SCORE_CAP;

#[derive(Debug, Clone)]
pub struct HighScore {
    value: u32,
    path: PathBuf,
}

impl HighScore {
    pub fn load(path: PathBuf) -> Self {
        let value = match fs::read_to_string(&path) {
            Ok(text) => match text.trim().parse::<u32>() {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("high score file is malformed ({err}), resetting to 0");
                    let _ = fs::write(&path, "0");
                    0
                }
            },
            Err(err) => {
                log::info!("no high score file ({err}), starting at 0");
                let _ = fs::write(&path, "0");
                0
            }
        };
        Self { value, path }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// A stored value above the score cap cannot come from play
    pub fn is_tampered(&self) -> bool {
        self.value > SCORE_CAP
    }

    /// Record a finished round. Returns true when it set a new record.
    pub fn submit(&mut self, score: u32) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        self.save();
        log::info!("new high score: {score}");
        true
    }

    fn save(&self) {
        if let Err(err) = fs::write(&self.path, self.value.to_string()) {
            log::warn!("could not save high score to {}: {err}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("ember-rush-score-{name}-{}.txt", std::process::id()))
    }

    #[test]
    fn missing_file_starts_at_zero_and_is_created() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let hs = HighScore::load(path.clone());
        assert_eq!(hs.value(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "0");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_is_reset() {
        let path = temp_path("malformed");
        fs::write(&path, "ninety nine").unwrap();
        let hs = HighScore::load(path.clone());
        assert_eq!(hs.value(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "0");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn submit_only_raises_the_record() {
        let path = temp_path("submit");
        fs::write(&path, "100").unwrap();
        let mut hs = HighScore::load(path.clone());
        assert!(!hs.submit(100));
        assert!(!hs.submit(50));
        assert_eq!(hs.value(), 100);

        assert!(hs.submit(250));
        assert_eq!(hs.value(), 250);
        assert_eq!(fs::read_to_string(&path).unwrap(), "250");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn whitespace_around_the_number_is_fine() {
        let path = temp_path("whitespace");
        fs::write(&path, " 1234\n").unwrap();
        let hs = HighScore::load(path.clone());
        assert_eq!(hs.value(), 1234);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn values_above_the_cap_read_as_tampered() {
        let path = temp_path("tampered");
        fs::write(&path, "1000000").unwrap();
        let hs = HighScore::load(path.clone());
        assert!(hs.is_tampered());

        let path2 = temp_path("legit");
        fs::write(&path2, "99999").unwrap();
        let hs2 = HighScore::load(path2.clone());
        assert!(!hs2.is_tampered());
        let _ = fs::remove_file(&path);
        let _ = fs::remove_file(&path2);
    }
}
