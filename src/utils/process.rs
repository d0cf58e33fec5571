use std::process::{Child, Command, Output, Stdio};

use log::{debug, warn};

use crate::error::{ConvertError, Result};
use crate::models::backend::BackendKind;

/// 持有外部子行程；離開作用域時若仍在執行則強制結束並回收
pub struct ChildGuard {
    child: Option<Child>,
    label: String,
}

impl ChildGuard {
    pub fn spawn(command: &mut Command, label: impl Into<String>) -> std::io::Result<Self> {
        let label = label.into();
        debug!("啟動外部程式：{:?}", command);
        let child = command.spawn()?;
        Ok(ChildGuard {
            child: Some(child),
            label,
        })
    }

    pub fn child_mut(&mut self) -> Option<&mut Child> {
        self.child.as_mut()
    }

    /// 等待結束並收集輸出，之後 guard 不再持有子行程
    pub fn wait_with_output(mut self) -> std::io::Result<Output> {
        match self.child.take() {
            Some(child) => child.wait_with_output(),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("{} 的行程已被回收", self.label),
            )),
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        match child.try_wait() {
            Ok(Some(_)) => {}
            _ => {
                if let Err(e) = child.kill() {
                    warn!("無法結束 {} 的行程：{}", self.label, e);
                }
                if let Err(e) = child.wait() {
                    warn!("無法回收 {} 的行程：{}", self.label, e);
                }
            }
        }
    }
}

/// 執行外部轉換工具直到結束；非零結束碼視為轉換失敗
pub fn run_to_completion(backend: BackendKind, command: &mut Command) -> Result<()> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let guard = ChildGuard::spawn(command, backend.display_name())
        .map_err(|e| ConvertError::conversion(backend.display_name(), format!("無法啟動：{}", e)))?;
    let output = guard
        .wait_with_output()
        .map_err(|e| ConvertError::conversion(backend.display_name(), e.to_string()))?;

    if output.status.success() {
        return Ok(());
    }
    let detail = last_line(&output.stderr)
        .or_else(|| last_line(&output.stdout))
        .unwrap_or_default();
    let cause = if detail.is_empty() {
        format!("結束碼 {}", output.status)
    } else {
        format!("結束碼 {}：{}", output.status, detail)
    };
    Err(ConvertError::conversion(backend.display_name(), cause))
}

fn last_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(str::to_string)
}
