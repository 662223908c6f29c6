use anyhow::Result;
use field_grammar::cli::run;

fn main() -> Result<()> {
    run()
}
