use std::io::{self, BufRead, Write};

use quiz_core::model::Difficulty;
use services::time_fmt::{format_clock, format_elapsed};
use services::{AdvanceOutcome, QuizService};

/// Terminal choices that may already be fixed by flags or environment.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    pub name: Option<String>,
    pub difficulty: Option<Difficulty>,
}

fn read_line(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_owned())
}

fn ask(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> io::Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;
    read_line(input)
}

fn resolve_name(
    quiz: &QuizService,
    options: &PlayOptions,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<String> {
    if let Some(name) = options.name.as_deref().filter(|n| !n.trim().is_empty()) {
        return Ok(name.to_owned());
    }
    let remembered = quiz.session().display_name();
    if !remembered.is_empty() {
        return Ok(remembered.to_owned());
    }
    loop {
        let name = ask(input, output, "Display name: ")?;
        if !name.is_empty() {
            return Ok(name);
        }
    }
}

fn resolve_difficulty(
    options: &PlayOptions,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<Difficulty> {
    if let Some(difficulty) = options.difficulty {
        return Ok(difficulty);
    }
    loop {
        let raw = ask(input, output, "Difficulty [easy/medium/hard]: ")?;
        match raw.parse() {
            Ok(difficulty) => return Ok(difficulty),
            Err(err) => writeln!(output, "{err}")?,
        }
    }
}

fn ask_option(
    input: &mut impl BufRead,
    output: &mut impl Write,
    option_count: usize,
) -> io::Result<usize> {
    loop {
        let raw = ask(input, output, "> ")?;
        match raw.parse::<usize>() {
            Ok(n) if (1..=option_count).contains(&n) => return Ok(n - 1),
            _ => writeln!(output, "Pick a number between 1 and {option_count}.")?,
        }
    }
}

/// Play one full session on the given terminal streams.
pub async fn run(
    quiz: &mut QuizService,
    options: &PlayOptions,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = resolve_name(quiz, options, input, output)?;
    let difficulty = resolve_difficulty(options, input, output)?;

    let total = quiz
        .select_difficulty(difficulty, &name)
        .await?
        .questions()
        .len();
    if total == 0 {
        writeln!(output, "No {difficulty} questions available.")?;
    }

    loop {
        if let Some(question) = quiz.session().current_question() {
            let position = quiz.session().current_index() + 1;
            writeln!(output)?;
            writeln!(output, "Question {position}/{total}: {}", question.prompt())?;
            for (i, option) in question.options().iter().enumerate() {
                writeln!(output, "  {}. {option}", i + 1)?;
            }
            let option_count = question.options().len();
            let correct_text = question.options()[question.correct_option()].clone();
            let citation = question.citation().map(str::to_owned);

            let pick = ask_option(input, output, option_count)?;
            let answer = quiz.answer_current_question(pick)?;
            write!(output, "[{}] ", format_clock(quiz.elapsed_ms()))?;
            if answer.is_correct {
                write!(output, "Correct!")?;
            } else {
                write!(output, "Wrong. The answer was {correct_text}.")?;
            }
            match citation {
                Some(reference) => writeln!(output, " ({reference})")?,
                None => writeln!(output)?,
            }
        }

        if let AdvanceOutcome::Completed {
            completion,
            recorded,
        } = quiz.advance().await?
        {
            writeln!(output)?;
            writeln!(
                output,
                "{}: {}/{} ({:.0}%) in {}. {}",
                completion.display_name,
                completion.correct_answers,
                completion.total_questions,
                completion.score_percent(),
                format_elapsed(completion.time_spent_ms()),
                completion.tier().label(),
            )?;
            if completion.is_recordable() && recorded.is_none() {
                writeln!(output, "(result could not be saved)")?;
            }
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;
    use services::AppServices;
    use std::io::Cursor;

    #[tokio::test]
    async fn scripted_game_records_history() {
        let app = AppServices::in_memory(fixed_clock()).unwrap();
        let mut quiz = app.quiz().await.unwrap();
        let options = PlayOptions {
            name: Some("Ana".into()),
            difficulty: Some(Difficulty::Easy),
        };
        // Ten answers; the first is retried after an out-of-range pick.
        let script = format!("9\n{}", "1\n".repeat(10));
        let mut input = Cursor::new(script.into_bytes());
        let mut output = Vec::new();

        run(&mut quiz, &options, &mut input, &mut output)
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Question 1/10"));
        assert!(text.contains("Pick a number between 1 and 4."));
        assert!(text.contains("Ana: "));
        assert!(text.contains("[00:00] "));
        assert_eq!(app.history().entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn prompts_for_missing_choices() {
        let app = AppServices::in_memory(fixed_clock()).unwrap();
        let mut quiz = app.quiz().await.unwrap();
        let script = format!("\nBo\nextreme\nhard\n{}", "2\n".repeat(10));
        let mut input = Cursor::new(script.into_bytes());
        let mut output = Vec::new();

        run(&mut quiz, &PlayOptions::default(), &mut input, &mut output)
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("unknown difficulty: extreme"));
        assert_eq!(quiz.session().display_name(), "Bo");
        assert_eq!(quiz.session().difficulty(), Some(Difficulty::Hard));
    }

    #[tokio::test]
    async fn closed_input_is_an_error() {
        let app = AppServices::in_memory(fixed_clock()).unwrap();
        let mut quiz = app.quiz().await.unwrap();
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        assert!(
            run(&mut quiz, &PlayOptions::default(), &mut input, &mut output)
                .await
                .is_err()
        );
    }
}
