//! 文件配置源
//!
//! 从本地文件加载配置，根据扩展名选择解析器，支持 JSON/JSON5/YAML/TOML 格式。
//! 文件内容中的 `${VAR}` 会在解析前替换为环境变量的值。

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::path::Path;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Json5,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// 根据文件扩展名推断格式
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| anyhow!("配置文件缺少扩展名: {}", path.display()))?;

        match ext.to_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "json5" => Ok(ConfigFormat::Json5),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(anyhow!("不支持的文件格式: {}", ext)),
        }
    }

    /// 将文本解析为 JSON 值
    pub fn parse(&self, content: &str) -> Result<JsonValue> {
        match self {
            ConfigFormat::Json => Ok(serde_json::from_str(content)?),
            ConfigFormat::Json5 => Ok(json5::from_str(content)?),
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            ConfigFormat::Toml => Ok(toml::from_str(content)?),
        }
    }
}

/// 读取配置文件并解析为 JSON 值
pub fn load_value(path: impl AsRef<Path>) -> Result<JsonValue> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
    let content = expand_env_vars(&content);

    format
        .parse(&content)
        .with_context(|| format!("解析配置文件失败: {}", path.display()))
}

/// 读取配置文件并反序列化为指定类型
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let value = load_value(path)?;
    serde_json::from_value(value)
        .with_context(|| format!("配置结构不匹配: {}", path.display()))
}

/// 替换 `${VAR_NAME}` 形式的环境变量，未定义的变量保持原样
pub fn expand_env_vars(content: &str) -> String {
    let re = match regex_lite::Regex::new(r"\$\{([^}]+)\}") {
        Ok(re) => re,
        Err(_) => return content.to_string(),
    };

    re.replace_all(content, |caps: &regex_lite::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}
