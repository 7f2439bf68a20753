use async_trait::async_trait;
use regex::Regex;
use std::process::Stdio;
use std::sync::LazyLock;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

use super::options::{NUMERIC, Options, REQUIRED_BY_PARSER, SnmpOption};
use super::oid::is_symbolic;
use super::{Reader, SnmpCommand};
use crate::error::CommandError;

static TIMEOUT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^timeout").unwrap());
static UNKNOWN_MIB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Cannot find module \(([^)]+)\)").unwrap());
static UNKNOWN_OID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\S+): Unknown Object Identifier").unwrap());

/// Запускает snmp* команды и забирает их stdout
#[derive(Debug, Clone)]
pub struct CommandReader {
    host: String,
    options: Options,
    env: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl CommandReader {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            options: Options::default(),
            env: Vec::new(),
            timeout: None,
        }
    }

    pub fn with_option(mut self, option: SnmpOption, value: impl Into<String>) -> Self {
        self.options.set(option, value);
        self
    }

    pub fn with_flag(mut self, option: SnmpOption) -> Self {
        self.options.enable(option);
        self
    }

    pub fn with_raw_option(mut self, flag: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.set_raw(flag, value);
        self
    }

    /// Переменные окружения для запускаемой команды (например `MIBS`)
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Общий таймаут на процесс, поверх `-t`/`-r` самой команды
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Аргументы команды, без имени программы
    pub fn args(
        &self,
        command: &SnmpCommand,
        oid: Option<&str>,
        extra: &[(String, String)],
    ) -> Vec<String> {
        let program = command.program();
        let mut args = Vec::new();

        if !oid.is_some_and(is_symbolic) {
            args.push(NUMERIC.to_owned());
        }
        args.extend(REQUIRED_BY_PARSER.iter().map(|flag| flag.to_string()));
        args.extend(self.options.host_args());
        args.push(self.host.clone());
        args.extend(self.options.command_args(&program));
        args.extend(extra.iter().map(|(flag, value)| format!("{flag}{value}")));
        args.extend(oid.map(str::to_owned));
        args
    }

    /// Командная строка целиком, для логов и подсказок
    pub fn cli(&self, command: &SnmpCommand, oid: Option<&str>, extra: &[(String, String)]) -> String {
        std::iter::once(command.program())
            .chain(self.args(command, oid, extra))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Reader for CommandReader {
    async fn capture(
        &self,
        command: &SnmpCommand,
        oid: &str,
        extra: &[(String, String)],
    ) -> Result<String, CommandError> {
        let program = command.program();
        tracing::debug!("Running {}", self.cli(command, Some(oid), extra));

        let mut cmd = Command::new(&program);
        cmd.args(self.args(command, Some(oid), extra))
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(duration) => timeout(duration, cmd.output()).await.map_err(|_| {
                CommandError::Timeout(format!(
                    "Timeout: {} did not finish within {}s",
                    program,
                    duration.as_secs()
                ))
            })?,
            None => cmd.output().await,
        }
        .map_err(|source| CommandError::Spawn {
            program: program.clone(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            return Err(classify_stderr(&stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Раскладывает stderr net-snmp по типам ошибок
pub fn classify_stderr(stderr: &str) -> CommandError {
    let message = stderr.trim_end_matches(['\r', '\n']).to_owned();

    if TIMEOUT.is_match(&message) {
        CommandError::Timeout(message)
    } else if let Some(caps) = UNKNOWN_MIB.captures(&message) {
        CommandError::UnknownMib(caps[1].to_owned())
    } else if let Some(caps) = UNKNOWN_OID.captures(&message) {
        CommandError::UnknownOid(caps[1].to_owned())
    } else {
        CommandError::Failed(message)
    }
}
