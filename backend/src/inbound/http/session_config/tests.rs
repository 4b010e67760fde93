//! Session toggle parsing across build modes.

use std::collections::HashMap;
use std::io::Write as _;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

fn env_from(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

struct ReleaseEnv {
    vars: HashMap<&'static str, String>,
    _key: NamedTempFile,
}

impl ReleaseEnv {
    fn with(mut self, name: &'static str, value: &str) -> Self {
        self.vars.insert(name, value.to_owned());
        self
    }

    fn without(mut self, name: &'static str) -> Self {
        self.vars.remove(name);
        self
    }

    fn settings(self) -> Result<SessionSettings, SessionConfigError> {
        let env = env_from(self.vars.clone());
        session_settings_from_env(&env, BuildMode::Release)
    }
}

#[fixture]
fn release() -> ReleaseEnv {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let path = key.path().to_string_lossy().into_owned();
    let vars = HashMap::from([
        (KEY_FILE_ENV, path),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]);
    ReleaseEnv { vars, _key: key }
}

#[rstest]
fn release_accepts_explicit_settings(release: ReleaseEnv) {
    let settings = release.settings().expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(release: ReleaseEnv, #[case] missing: &'static str) {
    let err = release.without(missing).settings().err().expect("missing toggle");
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sideways")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
fn release_rejects_malformed_toggles(
    release: ReleaseEnv,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let err = release.with(name, value).settings().err().expect("malformed toggle");
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_rejects_ephemeral_keys(release: ReleaseEnv) {
    let err = release
        .with(ALLOW_EPHEMERAL_ENV, "yes")
        .settings()
        .err()
        .expect("ephemeral rejected");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_insecure_same_site_none(release: ReleaseEnv) {
    let err = release
        .with(COOKIE_SECURE_ENV, "0")
        .with(SAMESITE_ENV, "None")
        .settings()
        .err()
        .expect("insecure None rejected");
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_rejects_short_keys(release: ReleaseEnv) {
    let short = key_file(40);
    let err = release
        .with(KEY_FILE_ENV, &short.path().to_string_lossy())
        .settings()
        .err()
        .expect("short key rejected");
    assert!(matches!(err, SessionConfigError::KeyTooShort { length: 40, .. }));
}

#[rstest]
fn release_rejects_unreadable_key_files(release: ReleaseEnv) {
    let err = release
        .with(KEY_FILE_ENV, "/nonexistent/helpdesk/session_key")
        .settings()
        .err()
        .expect("missing key file");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let env = env_from(HashMap::from([(
        KEY_FILE_ENV,
        "/nonexistent/helpdesk/session_key".to_owned(),
    )]));
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("unexpected", SameSite::Lax)]
#[case(" strict ", SameSite::Strict)]
#[case("NONE", SameSite::None)]
fn debug_same_site_parsing(#[case] raw: &str, #[case] expected: SameSite) {
    let key = key_file(SESSION_KEY_MIN_LEN);
    let env = env_from(HashMap::from([
        (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
        (SAMESITE_ENV, raw.to_owned()),
    ]));
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug settings");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
fn debug_rejects_keys_too_short_to_derive_from() {
    let key = key_file(8);
    let env = env_from(HashMap::from([(
        KEY_FILE_ENV,
        key.path().to_string_lossy().into_owned(),
    )]));
    let err = session_settings_from_env(&env, BuildMode::Debug)
        .err()
        .expect("tiny key rejected");
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort {
            min_len: DEBUG_SESSION_KEY_MIN_LEN,
            ..
        }
    ));
}
