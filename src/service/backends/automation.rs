use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{ChildStdin, ChildStdout, Command, Stdio};

use log::{debug, warn};

use crate::error::{ConvertError, Result};
use crate::models::backend::{BackendKind, TargetFormat};
use crate::service::traits::i_service::ConversionBackend;
use crate::utils::process::ChildGuard;

const OK_MARK: &str = "__WPC_OK__";
const ERR_MARK: &str = "__WPC_ERR__";

// 文書處理器自動化工作階段
pub trait AutomationSession {
    /// 開啟文件、另存為指定格式、關閉文件（不儲存其他變更）
    fn save_as(&mut self, source: &Path, target: &Path, format: TargetFormat) -> Result<()>;

    /// 結束應用程式並釋放工作階段
    fn quit(&mut self) -> Result<()>;
}

// 能建立自動化工作階段的主機
pub trait AutomationHost {
    fn is_available(&self) -> bool;
    fn start_session(&self) -> Result<Box<dyn AutomationSession>>;
}

/// 持有工作階段，離開作用域時一定呼叫 `quit`；結束失敗只記錄不回報
pub struct SessionGuard {
    session: Option<Box<dyn AutomationSession>>,
}

impl SessionGuard {
    pub fn new(session: Box<dyn AutomationSession>) -> Self {
        SessionGuard {
            session: Some(session),
        }
    }

    pub fn save_as(&mut self, source: &Path, target: &Path, format: TargetFormat) -> Result<()> {
        match self.session.as_mut() {
            Some(session) => session.save_as(source, target, format),
            None => Err(ConvertError::conversion(
                BackendKind::VendorAutomation.display_name(),
                "工作階段已關閉",
            )),
        }
    }

    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.quit() {
                warn!("關閉 Word 自動化工作階段失敗：{}", e);
            }
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// 透過文書處理器自動化另存新檔，每個檔案一個工作階段
pub struct WordAutomationBackend {
    host: Box<dyn AutomationHost>,
}

impl WordAutomationBackend {
    pub fn new(host: Box<dyn AutomationHost>) -> Self {
        WordAutomationBackend { host }
    }
}

impl ConversionBackend for WordAutomationBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::VendorAutomation
    }

    fn is_available(&self) -> bool {
        self.host.is_available()
    }

    fn try_convert(&self, source: &Path, target: &Path, format: TargetFormat) -> Result<()> {
        let mut guard = SessionGuard::new(self.host.start_session()?);
        guard.save_as(source, target, format)?;
        guard.close();
        Ok(())
    }
}

/// 以常駐的 PowerShell 行程驅動 Word COM 物件
pub struct PowerShellWordHost {
    powershell: Option<PathBuf>,
}

impl PowerShellWordHost {
    pub fn new(powershell: Option<PathBuf>) -> Self {
        PowerShellWordHost { powershell }
    }
}

impl AutomationHost for PowerShellWordHost {
    fn is_available(&self) -> bool {
        self.powershell.is_some()
    }

    fn start_session(&self) -> Result<Box<dyn AutomationSession>> {
        let powershell = self.powershell.as_deref().ok_or_else(|| {
            ConvertError::BackendUnavailable(format!(
                "無法使用 {}，請{}",
                BackendKind::VendorAutomation,
                BackendKind::VendorAutomation.install_hint()
            ))
        })?;
        let session = PowerShellWordSession::start(powershell)?;
        Ok(Box::new(session))
    }
}

struct PowerShellWordSession {
    guard: ChildGuard,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

impl PowerShellWordSession {
    fn start(powershell: &Path) -> Result<Self> {
        let mut command = Command::new(powershell);
        command
            .args(["-NoLogo", "-NoProfile", "-NonInteractive", "-Command", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        let mut guard = ChildGuard::spawn(&mut command, "PowerShell")
            .map_err(|e| automation_error(format!("無法啟動 PowerShell：{}", e)))?;
        let child = guard
            .child_mut()
            .ok_or_else(|| automation_error("PowerShell 行程不存在"))?;
        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| automation_error("無法讀取 PowerShell 輸出"))?;

        let mut session = PowerShellWordSession {
            guard,
            stdin,
            stdout: BufReader::new(stdout),
        };
        session.execute(
            "$word = New-Object -ComObject Word.Application; try { $word.Visible = $false } catch {}; $word.DisplayAlerts = 0",
        )?;
        Ok(session)
    }

    /// 傳送一行指令並等待成功或失敗標記
    fn execute(&mut self, statement: &str) -> Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| automation_error("PowerShell 工作階段已關閉"))?;
        stdin
            .write_all(wrap_statement(statement).as_bytes())
            .and_then(|_| stdin.flush())
            .map_err(|e| automation_error(format!("無法傳送指令：{}", e)))?;

        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .stdout
                .read_line(&mut line)
                .map_err(|e| automation_error(e.to_string()))?;
            if read == 0 {
                return Err(automation_error("PowerShell 工作階段意外結束"));
            }
            let trimmed = line.trim();
            if trimmed == OK_MARK {
                return Ok(());
            }
            if let Some(message) = trimmed.strip_prefix(ERR_MARK) {
                return Err(automation_error(message.trim()));
            }
            debug!("PowerShell：{}", trimmed);
        }
    }
}

impl AutomationSession for PowerShellWordSession {
    fn save_as(&mut self, source: &Path, target: &Path, format: TargetFormat) -> Result<()> {
        // Word 以自身的工作目錄解析相對路徑
        let source = std::path::absolute(source)?;
        let target = std::path::absolute(target)?;
        let statement = save_as_statement(&source, &target, format);
        self.execute(&statement)
    }

    fn quit(&mut self) -> Result<()> {
        let result = self.execute(
            "$word.Quit(); [System.Runtime.InteropServices.Marshal]::ReleaseComObject($word) | Out-Null",
        );
        if let Some(mut stdin) = self.stdin.take() {
            let _ = stdin.write_all(b"exit\n");
        }
        if let Some(child) = self.guard.child_mut() {
            let _ = child.wait();
        }
        result
    }
}

fn automation_error(cause: impl Into<String>) -> ConvertError {
    ConvertError::conversion(BackendKind::VendorAutomation.display_name(), cause)
}

fn wrap_statement(statement: &str) -> String {
    format!(
        "try {{ {}; [Console]::Out.WriteLine('{}') }} catch {{ [Console]::Out.WriteLine('{} ' + ($_.Exception.Message -replace '\\s+', ' ')) }}\n",
        statement, OK_MARK, ERR_MARK
    )
}

fn ps_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', "''"))
}

fn save_as_statement(source: &Path, target: &Path, format: TargetFormat) -> String {
    format!(
        "$doc = $null; $target = {}; $fmt = {}; try {{ $doc = $word.Documents.Open({}, $false, $true); $doc.SaveAs([ref]$target, [ref]$fmt) }} finally {{ if ($doc) {{ $doc.Close([ref]$false) }} }}",
        ps_quote(target),
        format.word_save_format(),
        ps_quote(source)
    )
}
