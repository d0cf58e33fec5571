use std::process::ExitCode;

use word_pdf_convert::action::cli::process_args;
use word_pdf_convert::error::exit_code;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match process_args(args) {
        Ok(output) => {
            log::info!(
                "程式執行完成，成功 {}/{}，輸出目錄：{}",
                output.result.converted,
                output.result.total,
                output.result.output_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            if e.is_input_error() {
                println!("錯誤：{}", e);
            } else {
                println!("轉換時發生錯誤：{}", e);
            }
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}
