use crate::error::AppResult;

pub fn print_lines<I, S>(lines: I) -> AppResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        println!("{}", line.as_ref());
    }
    Ok(())
}
