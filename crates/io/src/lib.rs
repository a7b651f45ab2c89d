#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use quadra_core::info::Info;
use quadra_core::math::Scalar;
use quadra_core::problem::ProblemData;
use quadra_core::solution::Solution;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// On-disk problem format: the raw problem data under a versioned wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonProblem {
    pub problem: ProblemData<Scalar>,
}

/// On-disk result format: solution plus run information.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResult {
    pub solution: Solution<Scalar>,
    pub info: Info<Scalar>,
}

pub fn read_json_problem<P: AsRef<Path>>(path: P) -> Result<ProblemData<Scalar>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {path:?}"))?;
    let reader = BufReader::new(file);
    let wrapper: JsonProblem =
        serde_json::from_reader(reader).with_context(|| format!("failed to parse {path:?}"))?;
    Ok(wrapper.problem)
}

pub fn write_json_problem<P: AsRef<Path>>(path: P, problem: &ProblemData<Scalar>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {path:?}"))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(
        writer,
        &JsonProblem {
            problem: problem.clone(),
        },
    )
    .context("failed to serialize problem")?;
    Ok(())
}

pub fn write_json_result<P: AsRef<Path>>(
    path: P,
    solution: &Solution<Scalar>,
    info: &Info<Scalar>,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent directory {parent:?}"))?;
        }
    }
    let file = File::create(path).with_context(|| format!("failed to create {path:?}"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(
        &mut writer,
        &JsonResult {
            solution: solution.clone(),
            info: info.clone(),
        },
    )
    .context("failed to serialize result")?;
    writer
        .flush()
        .with_context(|| format!("failed to write result into {path:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_json_roundtrip() {
        let input = r#"{"problem":{"n":1,"m":1,
            "p":{"nrows":1,"ncols":1,"indptr":[0,1],"indices":[0],"data":[2.0]},
            "q":[0.0],
            "a":{"nrows":1,"ncols":1,"indptr":[0,1],"indices":[0],"data":[1.0]},
            "l":[1.0],"u":[3.0]}}"#;
        let parsed: JsonProblem = serde_json::from_str(input).unwrap();
        assert_eq!(parsed.problem.n, 1);
        assert!(parsed.problem.validate().is_ok());
        let mut buffer = Vec::new();
        serde_json::to_writer(&mut buffer, &parsed).unwrap();
        let reparsed: JsonProblem = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(reparsed.problem.u, vec![3.0]);
    }
}
