use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Язык контента сайта
///
/// Порядок вариантов задаёт порядок вкладок и элементов в массивах `translations`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Азербайджанский (обязательный)
    #[default]
    Az,
    En,
    Ru,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Az, Lang::En, Lang::Ru];

    pub fn code(&self) -> &'static str {
        match self {
            Lang::Az => "az",
            Lang::En => "en",
            Lang::Ru => "ru",
        }
    }

    /// Подпись вкладки
    pub fn label(&self) -> &'static str {
        match self {
            Lang::Az => "AZ",
            Lang::En => "EN",
            Lang::Ru => "RU",
        }
    }

    /// Перевод на этот язык обязателен при сохранении
    pub fn is_required(&self) -> bool {
        matches!(self, Lang::Az)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "az" => Ok(Lang::Az),
            "en" => Ok(Lang::En),
            "ru" => Ok(Lang::Ru),
            other => Err(anyhow::anyhow!("Unsupported language: {}", other)),
        }
    }
}
