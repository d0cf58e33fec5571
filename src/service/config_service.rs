use log::debug;

use crate::config::ports::{AppConfig, ConfigPort};
use crate::error::Result;

// 配置服務，負責從選定的配置適配器取得配置
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> Result<AppConfig> {
        let config = self.config_port.get_config()?;
        debug!("使用配置：{:?}", config);
        Ok(config)
    }
}
