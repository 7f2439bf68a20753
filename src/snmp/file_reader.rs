use async_trait::async_trait;
use std::path::PathBuf;

use super::command_reader::CommandReader;
use super::{Reader, SnmpCommand};
use crate::error::CommandError;

/// Источник данных для тестов: вместо запуска команд читает
/// `<directory>/<команда>/<oid>` с заранее сохраненным выводом
#[derive(Debug, Clone)]
pub struct FileReader {
    directory: PathBuf,
    warnings: bool,
    make_directories: bool,
    generator: CommandReader,
}

impl FileReader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            warnings: false,
            make_directories: false,
            // Подсказка для записи фикстуры, опции подставляются вручную
            generator: CommandReader::new("$OPTIONS"),
        }
    }

    /// Подсказывать в логе команду, которой можно записать недостающий файл
    pub fn with_warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_make_directories(mut self, make_directories: bool) -> Self {
        self.make_directories = make_directories;
        self
    }

    pub fn path_for(&self, command: &SnmpCommand, oid: &str) -> PathBuf {
        self.directory.join(command.name()).join(oid)
    }
}

#[async_trait]
impl Reader for FileReader {
    async fn capture(
        &self,
        command: &SnmpCommand,
        oid: &str,
        extra: &[(String, String)],
    ) -> Result<String, CommandError> {
        if self.make_directories {
            let dir = self.directory.join(command.name());
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|source| CommandError::Read { path: dir, source })?;
        }

        let path = self.path_for(command, oid);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(source) => {
                if self.warnings {
                    tracing::warn!(
                        "{} > {}",
                        self.generator.cli(command, Some(oid), extra),
                        path.display()
                    );
                }
                Err(CommandError::Read { path, source })
            }
        }
    }
}
