use crate::error::CliResult;
use crate::suite::all_cases;
use crate::utils::ColoredOutput;

pub struct ListCommand;

impl ListCommand {
    pub fn run() -> CliResult<()> {
        let cases = all_cases();
        for case in &cases {
            println!(
                "{} {}",
                ColoredOutput::dim(&format!("{:<16}", case.category.as_str())),
                case.name
            );
        }
        println!("\n{} test cases", ColoredOutput::highlight(&cases.len().to_string()));
        Ok(())
    }
}
