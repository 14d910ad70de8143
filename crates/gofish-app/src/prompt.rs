use crate::error::ShellError;
use gofish_core::game::engine::{MAX_OPPONENTS, MIN_OPPONENTS};
use std::io::{BufRead, Write};

/// Writes `prompt` and reads one trimmed line. End of input is an error.
pub fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<String, ShellError> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ShellError::InputClosed);
    }
    Ok(line.trim().to_string())
}

/// Asks until an opponent count in range is entered.
pub fn prompt_opponent_count<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<usize, ShellError> {
    loop {
        let line = read_line(
            input,
            output,
            &format!("How many AI players do you want to play with? ({MIN_OPPONENTS}-{MAX_OPPONENTS}): "),
        )?;
        match line.parse::<usize>() {
            Ok(count) if (MIN_OPPONENTS..=MAX_OPPONENTS).contains(&count) => return Ok(count),
            Ok(_) => writeln!(
                output,
                "Please enter a number between {MIN_OPPONENTS} and {MAX_OPPONENTS}."
            )?,
            Err(_) => writeln!(output, "Invalid input. Please enter a number.")?,
        }
    }
}
