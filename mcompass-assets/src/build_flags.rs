//! Preprocessor definitions describing the firmware build.
//!
//! The firmware reads the git metadata for its info page and the `DEFAULT_*`
//! settings for the values it falls back to after a factory reset. The
//! settings come from environment variables so that CI can build every
//! hardware variant from the same tree.

use std::env;
use std::path::Path;
use std::process::Command;

use super::Error;

/// Version reported by the firmware info page.
pub const FIRMWARE_VERSION: &str = "1.0.3";
/// Placeholder for git metadata that cannot be determined.
pub const UNKNOWN: &str = "unknown";

pub const MODEL_VAR: &str = "DEFAULT_MODEL";
pub const SERVER_MODE_VAR: &str = "DEFAULT_SERVER_MODE";
pub const SENSOR_MODEL_VAR: &str = "DEFAULT_SENSOR_MODEL";

const KNOWN_MODELS: [&str; 2] = ["LITE", "GPS"];
const KNOWN_SERVER_MODES: [&str; 2] = ["WIFI", "BLE"];

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DefineValue {
    /// A string literal, quoted in the output.
    Str(String),
    /// An expression that is pasted verbatim.
    Token(String),
    Int(i64),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Define {
    pub name: String,
    pub value: DefineValue,
}

impl Define {
    pub fn new(name: &str, value: DefineValue) -> Define {
        Define {
            name: name.to_string(),
            value,
        }
    }
}

/// The set of definitions handed to the compiler.
#[derive(Clone, Default, Debug)]
pub struct BuildEnv {
    defines: Vec<Define>,
}

impl BuildEnv {
    pub fn new() -> BuildEnv {
        BuildEnv::default()
    }

    /// Appends definitions. A name that is already defined gets the new value
    /// in its old position.
    pub fn append<I>(&mut self, defines: I)
    where
        I: IntoIterator<Item = Define>,
    {
        for define in defines {
            match self.defines.iter_mut().find(|d| d.name == define.name) {
                Some(existing) => existing.value = define.value,
                None => self.defines.push(define),
            }
        }
    }

    pub fn defines(&self) -> &[Define] {
        &self.defines
    }

    pub fn get(&self, name: &str) -> Option<&DefineValue> {
        self.defines
            .iter()
            .find(|d| d.name == name)
            .map(|d| &d.value)
    }

    /// One `-DNAME=VALUE` compiler flag per line, in the format PlatformIO
    /// expects from a dynamic `build_flags = !command` entry.
    pub fn to_flags(&self) -> String {
        let mut flags = "".to_string();
        for define in self.defines.iter() {
            let value = match &define.value {
                DefineValue::Str(s) => format!("\\\"{}\\\"", escape(s)),
                DefineValue::Token(t) => t.clone(),
                DefineValue::Int(i) => i.to_string(),
            };
            flags += &format!("-D{}={}\n", define.name, value);
        }
        flags
    }

    /// A C header with one `#define` per definition.
    pub fn to_header(&self) -> String {
        let mut header = "#pragma once\n\n".to_string();
        for define in self.defines.iter() {
            let value = match &define.value {
                DefineValue::Str(s) => format!("\"{}\"", escape(s)),
                DefineValue::Token(t) => t.clone(),
                DefineValue::Int(i) => i.to_string(),
            };
            header += &format!("#define {} {}\n", define.name, value);
        }
        header
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GitInfo {
    pub branch: String,
    pub commit: String,
}

impl GitInfo {
    pub fn unknown() -> GitInfo {
        GitInfo {
            branch: UNKNOWN.to_string(),
            commit: UNKNOWN.to_string(),
        }
    }

    /// Reads the current branch and short commit hash of the repository
    /// containing `dir`.
    ///
    /// Never fails: if either value cannot be read, both are
    /// [`UNKNOWN`].
    pub fn query(dir: &Path) -> GitInfo {
        let branch = rev_parse(dir, &["--abbrev-ref", "HEAD"]);
        let commit = rev_parse(dir, &["--short", "HEAD"]);
        match (branch, commit) {
            (Ok(branch), Ok(commit)) => GitInfo { branch, commit },
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("git metadata unavailable: {}", e);
                GitInfo::unknown()
            }
        }
    }
}

fn rev_parse(dir: &Path, args: &[&str]) -> Result<String, Error> {
    let mut cmd = Command::new("git");
    cmd.arg("rev-parse").args(args).current_dir(dir);
    log::trace!("running {:?}", cmd);

    let output = cmd.output()?;
    if !output.status.success() {
        return Err(Error::CommandFailed {
            code: output.status.code(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Values used when the corresponding environment variable is not set.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FlagDefaults {
    pub model: String,
    pub server_mode: String,
    pub sensor_model: String,
}

impl Default for FlagDefaults {
    fn default() -> FlagDefaults {
        FlagDefaults {
            model: "LITE".to_string(),
            server_mode: "BLE".to_string(),
            sensor_model: "5883P".to_string(),
        }
    }
}

impl FlagDefaults {
    /// Defaults of the first hardware revision, which always had GPS.
    pub fn gps() -> FlagDefaults {
        FlagDefaults {
            model: "GPS".to_string(),
            ..FlagDefaults::default()
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Settings {
    pub model: String,
    pub server_mode: String,
    pub sensor_model: String,
}

impl Settings {
    /// Resolves the settings through `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup<F>(lookup: F, defaults: &FlagDefaults) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        Settings {
            model: lookup(MODEL_VAR).unwrap_or_else(|| defaults.model.clone()),
            server_mode: lookup(SERVER_MODE_VAR).unwrap_or_else(|| defaults.server_mode.clone()),
            sensor_model: lookup(SENSOR_MODEL_VAR)
                .unwrap_or_else(|| defaults.sensor_model.clone()),
        }
    }

    /// Resolves the settings from the process environment. Values that are
    /// not valid UTF-8 are converted lossily, not ignored.
    pub fn from_env(defaults: &FlagDefaults) -> Settings {
        Settings::from_lookup(env_lookup, defaults)
    }
}

fn env_lookup(name: &str) -> Option<String> {
    env::var_os(name).map(|value| value.to_string_lossy().into_owned())
}

/// Maps a sensor name to the firmware's `SENSOR_MODEL_*` value. Only the
/// discontinued QMC5883L is 0, everything else is treated as the QMC5883P.
pub fn sensor_model_value(sensor_model: &str) -> i64 {
    if sensor_model == "5883L" {
        0
    } else {
        1
    }
}

/// Builds the definitions for one firmware build. Model and server mode are
/// not validated and end up in the enum expression as given.
pub fn collect_defines(git: &GitInfo, settings: &Settings, version: &str) -> Vec<Define> {
    if !KNOWN_MODELS.contains(&settings.model.as_str()) {
        log::warn!("unknown model {:?}", settings.model);
    }
    if !KNOWN_SERVER_MODES.contains(&settings.server_mode.as_str()) {
        log::warn!("unknown server mode {:?}", settings.server_mode);
    }

    vec![
        Define::new("GIT_BRANCH", DefineValue::Str(git.branch.clone())),
        Define::new("GIT_COMMIT", DefineValue::Str(git.commit.clone())),
        Define::new("BUILD_VERSION", DefineValue::Str(version.to_string())),
        Define::new(
            MODEL_VAR,
            DefineValue::Token(format!("mcompass::Model::{}", settings.model)),
        ),
        Define::new(
            SERVER_MODE_VAR,
            DefineValue::Token(format!("mcompass::ServerMode::{}", settings.server_mode)),
        ),
        Define::new(
            SENSOR_MODEL_VAR,
            DefineValue::Int(sensor_model_value(&settings.sensor_model)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name: &str| vars.get(name).cloned()
    }

    fn git() -> GitInfo {
        GitInfo {
            branch: "main".to_string(),
            commit: "1a2b3c4".to_string(),
        }
    }

    #[test]
    fn defaults_when_unset() {
        let settings = Settings::from_lookup(lookup(&[]), &FlagDefaults::default());
        assert_eq!(settings.model, "LITE");
        assert_eq!(settings.server_mode, "BLE");
        assert_eq!(settings.sensor_model, "5883P");

        let settings = Settings::from_lookup(lookup(&[]), &FlagDefaults::gps());
        assert_eq!(settings.model, "GPS");
        assert_eq!(settings.server_mode, "BLE");
        assert_eq!(settings.sensor_model, "5883P");
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars = lookup(&[(MODEL_VAR, "GPS"), (SENSOR_MODEL_VAR, "5883L")]);
        let settings = Settings::from_lookup(vars, &FlagDefaults::default());
        assert_eq!(settings.model, "GPS");
        assert_eq!(settings.server_mode, "BLE");
        assert_eq!(settings.sensor_model, "5883L");
    }

    #[test]
    fn sensor_model_values() {
        assert_eq!(sensor_model_value("5883L"), 0);
        assert_eq!(sensor_model_value("5883P"), 1);
        assert_eq!(sensor_model_value("MMC5883MA"), 1);
        assert_eq!(sensor_model_value(""), 1);
    }

    #[test]
    fn defines_for_build() {
        let settings = Settings::from_lookup(lookup(&[]), &FlagDefaults::default());
        let mut env = BuildEnv::new();
        env.append(collect_defines(&git(), &settings, FIRMWARE_VERSION));

        let names = env.defines().iter().map(|d| d.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "GIT_BRANCH",
                "GIT_COMMIT",
                "BUILD_VERSION",
                "DEFAULT_MODEL",
                "DEFAULT_SERVER_MODE",
                "DEFAULT_SENSOR_MODEL"
            ]
        );
        assert_eq!(
            env.get("DEFAULT_MODEL"),
            Some(&DefineValue::Token("mcompass::Model::LITE".to_string()))
        );
        assert_eq!(env.get("DEFAULT_SENSOR_MODEL"), Some(&DefineValue::Int(1)));
    }

    #[test]
    fn unknown_values_flow_through() {
        let vars = lookup(&[(MODEL_VAR, "PRO"), (SERVER_MODE_VAR, "ble")]);
        let settings = Settings::from_lookup(vars, &FlagDefaults::default());
        let defines = collect_defines(&git(), &settings, "2.0.0");
        assert_eq!(
            defines[3].value,
            DefineValue::Token("mcompass::Model::PRO".to_string())
        );
        assert_eq!(
            defines[4].value,
            DefineValue::Token("mcompass::ServerMode::ble".to_string())
        );
    }

    #[test]
    fn flags_and_header() {
        let mut env = BuildEnv::new();
        env.append(vec![
            Define::new("GIT_BRANCH", DefineValue::Str("main".to_string())),
            Define::new("DEFAULT_MODEL", DefineValue::Token("mcompass::Model::GPS".to_string())),
            Define::new("DEFAULT_SENSOR_MODEL", DefineValue::Int(0)),
        ]);
        assert_eq!(
            env.to_flags(),
            "-DGIT_BRANCH=\\\"main\\\"\n\
             -DDEFAULT_MODEL=mcompass::Model::GPS\n\
             -DDEFAULT_SENSOR_MODEL=0\n"
        );
        assert_eq!(
            env.to_header(),
            "#pragma once\n\n\
             #define GIT_BRANCH \"main\"\n\
             #define DEFAULT_MODEL mcompass::Model::GPS\n\
             #define DEFAULT_SENSOR_MODEL 0\n"
        );
    }

    #[test]
    fn append_replaces_existing() {
        let mut env = BuildEnv::new();
        env.append(vec![
            Define::new("A", DefineValue::Int(1)),
            Define::new("B", DefineValue::Int(2)),
        ]);
        env.append(vec![Define::new("A", DefineValue::Int(3))]);
        assert_eq!(env.defines().len(), 2);
        assert_eq!(env.defines()[0], Define::new("A", DefineValue::Int(3)));
    }

    #[test]
    fn header_escapes_strings() {
        let mut env = BuildEnv::new();
        env.append(vec![Define::new(
            "GIT_BRANCH",
            DefineValue::Str("a\"b".to_string()),
        )]);
        assert_eq!(env.to_header(), "#pragma once\n\n#define GIT_BRANCH \"a\\\"b\"\n");
    }

    #[test]
    fn not_a_repository_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(GitInfo::query(dir.path()), GitInfo::unknown());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_environment_value_is_kept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = "MCOMPASS_TEST_NON_UTF8_VALUE";
        env::set_var(name, OsStr::from_bytes(b"GPS\xff"));
        assert_eq!(env_lookup(name), Some("GPS\u{fffd}".to_string()));
        env::remove_var(name);
        assert_eq!(env_lookup(name), None);
    }

    #[test]
    fn git_failure_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let info = GitInfo::query(&dir.path().join("missing"));
        assert_eq!(info, GitInfo::unknown());
        assert_eq!(info.branch, "unknown");
        assert_eq!(info.commit, "unknown");
    }
}
