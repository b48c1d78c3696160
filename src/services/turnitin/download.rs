use std::time::Duration;

use reqwest::Url;

use crate::config::PlatformConfig;
use crate::errors::{BridgeError, Result};

/// 下载 ORA 附件
#[async_trait::async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpFileFetcher {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpFileFetcher {
    pub fn new(config: &PlatformConfig) -> Result<Self> {
        let base_url = if config.lms_root_url.trim().is_empty() {
            None
        } else {
            Some(Url::parse(&config.lms_root_url).map_err(|e| {
                BridgeError::configuration(format!(
                    "platform.lms_root_url 无效 '{}': {e}",
                    config.lms_root_url
                ))
            })?)
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.download_timeout.max(1)))
            .build()
            .map_err(|e| BridgeError::configuration(format!("HTTP 客户端创建失败: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// 相对地址基于 LMS 根地址解析
    fn resolve(&self, url: &str) -> Result<Url> {
        if let Ok(absolute) = Url::parse(url) {
            return Ok(absolute);
        }
        match &self.base_url {
            Some(base) => base
                .join(url)
                .map_err(|e| BridgeError::file_download(format!("无效的下载地址 {url}: {e}"))),
            None => Err(BridgeError::file_download(format!(
                "无法解析相对下载地址 {url}: 未配置 platform.lms_root_url"
            ))),
        }
    }
}

#[async_trait::async_trait]
impl FileFetcher for HttpFileFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let resolved = self.resolve(url)?;
        let response = self
            .client
            .get(resolved)
            .send()
            .await
            .map_err(|e| BridgeError::file_download(format!("Failed to download file from {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::file_download(format!(
                "Failed to download file from {url}, status {}",
                status.as_u16()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BridgeError::file_download(format!("Failed to read file from {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}
