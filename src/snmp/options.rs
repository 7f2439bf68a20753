//! Опции командной строки net-snmp (см. snmpcmd(1))

use std::fmt;
use std::str::FromStr;

/// Опции, которые всегда нужны парсеру: числовые индексы таблиц,
/// числовые перечисления и значения без единиц измерения
pub const REQUIRED_BY_PARSER: [&str; 3] = ["-Ob", "-Oe", "-OU"];

/// Числовые OID в выводе; не добавляется для символьных OID
pub const NUMERIC: &str = "-On";

/// Именованные опции подключения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnmpOption {
    Version,
    AuthPassword,
    AuthProtocol,
    Community,
    Context,
    NoCheckIncreasing,
    PrivPassword,
    PrivProtocol,
    SecLevel,
    SecUser,
    Retries,
    Timeout,
}

/// Куда попадает флаг опции
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Общий для всех команд
    Host(&'static str),
    /// Только для перечисленных программ: (программа, флаг)
    Commands(&'static [(&'static str, &'static str)]),
}

impl SnmpOption {
    pub fn flag(self) -> Flag {
        match self {
            SnmpOption::Version => Flag::Host("-v"),
            SnmpOption::AuthPassword => Flag::Host("-A"),
            SnmpOption::AuthProtocol => Flag::Host("-a"),
            SnmpOption::Community => Flag::Host("-c"),
            SnmpOption::Context => Flag::Host("-n"),
            SnmpOption::NoCheckIncreasing => {
                Flag::Commands(&[("snmpbulkwalk", "-Cc"), ("snmpwalk", "-Cc")])
            }
            // не рекомендуется, см. snmp.conf(5)
            SnmpOption::PrivPassword => Flag::Host("-X"),
            SnmpOption::PrivProtocol => Flag::Host("-x"),
            SnmpOption::SecLevel => Flag::Host("-l"),
            SnmpOption::SecUser => Flag::Host("-u"),
            SnmpOption::Retries => Flag::Host("-r"),
            SnmpOption::Timeout => Flag::Host("-t"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SnmpOption::Version => "version",
            SnmpOption::AuthPassword => "auth_password",
            SnmpOption::AuthProtocol => "auth_protocol",
            SnmpOption::Community => "community",
            SnmpOption::Context => "context",
            SnmpOption::NoCheckIncreasing => "no_check_increasing",
            SnmpOption::PrivPassword => "priv_password",
            SnmpOption::PrivProtocol => "priv_protocol",
            SnmpOption::SecLevel => "sec_level",
            SnmpOption::SecUser => "sec_user",
            SnmpOption::Retries => "retries",
            SnmpOption::Timeout => "timeout",
        }
    }
}

impl fmt::Display for SnmpOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SnmpOption {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let option = match s.replace('-', "_").as_str() {
            "version" => SnmpOption::Version,
            "auth_password" => SnmpOption::AuthPassword,
            "auth_protocol" => SnmpOption::AuthProtocol,
            "community" => SnmpOption::Community,
            "context" => SnmpOption::Context,
            "no_check_increasing" => SnmpOption::NoCheckIncreasing,
            "priv_password" => SnmpOption::PrivPassword,
            "priv_protocol" => SnmpOption::PrivProtocol,
            "sec_level" => SnmpOption::SecLevel,
            "sec_user" => SnmpOption::SecUser,
            "retries" => SnmpOption::Retries,
            "timeout" => SnmpOption::Timeout,
            _ => anyhow::bail!("Unknown option {}", s),
        };
        Ok(option)
    }
}

/// Набор флагов; повторная установка флага заменяет значение на месте
#[derive(Debug, Clone, Default)]
pub struct Options {
    host: Vec<(String, String)>,
    commands: Vec<(String, Vec<(String, String)>)>,
}

impl Options {
    pub fn set(&mut self, option: SnmpOption, value: impl Into<String>) {
        let value = value.into();
        match option.flag() {
            Flag::Host(flag) => insert(&mut self.host, flag, value),
            Flag::Commands(commands) => {
                for (program, flag) in commands {
                    let index = match self.commands.iter().position(|(p, _)| p == program) {
                        Some(index) => index,
                        None => {
                            self.commands.push((program.to_string(), Vec::new()));
                            self.commands.len() - 1
                        }
                    };
                    insert(&mut self.commands[index].1, flag, value.clone());
                }
            }
        }
    }

    /// Флаг без значения, например `-Cc`
    pub fn enable(&mut self, option: SnmpOption) {
        self.set(option, "");
    }

    /// Произвольный флаг, передается как есть: `set_raw("-m", "ALL")` → `-mALL`
    pub fn set_raw(&mut self, flag: impl Into<String>, value: impl Into<String>) {
        insert(&mut self.host, &flag.into(), value.into());
    }

    pub fn host_args(&self) -> impl Iterator<Item = String> + '_ {
        self.host.iter().map(|(flag, value)| format!("{flag}{value}"))
    }

    pub fn command_args<'a>(&'a self, program: &str) -> impl Iterator<Item = String> + 'a {
        self.commands
            .iter()
            .find(|(p, _)| p == program)
            .into_iter()
            .flat_map(|(_, flags)| flags.iter().map(|(flag, value)| format!("{flag}{value}")))
    }
}

fn insert(flags: &mut Vec<(String, String)>, flag: &str, value: String) {
    match flags.iter_mut().find(|(f, _)| f == flag) {
        Some(entry) => entry.1 = value,
        None => flags.push((flag.to_owned(), value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_options_keep_order_and_replace() {
        let mut options = Options::default();
        options.set(SnmpOption::Version, "1");
        options.set(SnmpOption::Community, "public");
        options.set(SnmpOption::Version, "2c");
        options.set_raw("-m", "ALL");

        let args: Vec<String> = options.host_args().collect();
        assert_eq!(args, vec!["-v2c", "-cpublic", "-mALL"]);
    }

    #[test]
    fn test_command_options() {
        let mut options = Options::default();
        options.enable(SnmpOption::NoCheckIncreasing);

        assert_eq!(options.command_args("snmpwalk").collect::<Vec<_>>(), vec!["-Cc"]);
        assert_eq!(options.command_args("snmpbulkwalk").collect::<Vec<_>>(), vec!["-Cc"]);
        assert_eq!(options.command_args("snmpget").count(), 0);
        assert_eq!(options.host_args().count(), 0);
    }

    #[test]
    fn test_option_names() {
        assert_eq!("auth_password".parse::<SnmpOption>().unwrap(), SnmpOption::AuthPassword);
        assert_eq!("sec-user".parse::<SnmpOption>().unwrap(), SnmpOption::SecUser);
        assert!("hostname".parse::<SnmpOption>().is_err());
        assert_eq!(SnmpOption::NoCheckIncreasing.to_string(), "no_check_increasing");
    }
}
