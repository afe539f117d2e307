use std::path::Path;

use anyhow::{Context, bail};

use crate::{
    parsers::parser::DatasetParser,
    problem::{
        customer::Customer,
        depot::Depot,
        instance::{Problem, ProblemBuilder},
        location::Location,
    },
};

/// Problem type marker for multi-depot instances in the Cordeau benchmark
/// format (<http://neo.lcc.uma.es/vrp/vrp-instances/>).
const PROBLEM_TYPE_MDVRP: u32 = 2;

/// Parser for Cordeau's positional MDVRP instance files.
///
/// The format packs everything into whitespace-separated integers: a header
/// `type m n t`, one `max_duration max_load` line per vehicle, then `n`
/// customer lines and `t` depot lines of the shape
/// `id x y service demand frequency ncombo combo...`.
///
/// Demands, visit frequencies and visit combinations are read but discarded:
/// this solver works the weaker duration-capped problem.
pub struct CordeauParser;

impl DatasetParser for CordeauParser {
    fn parse<P: AsRef<Path>>(&self, file: P) -> Result<Problem, anyhow::Error> {
        let file_content = std::fs::read_to_string(file)?;
        let instance = parse(&file_content)?;

        let mut builder = ProblemBuilder::default();
        builder.set_customers(instance.customers);
        builder.set_depots(instance.depots);
        if let Some(daily_cap) = instance.daily_cap {
            builder.set_daily_cap(daily_cap);
        }

        Ok(builder.build())
    }
}

#[derive(Debug)]
pub struct CordeauInstance {
    pub customers: Vec<Customer>,
    pub depots: Vec<Depot>,
    /// Maximum route duration from the first vehicle line, when positive.
    /// A zero means the instance leaves the duration unconstrained and the
    /// problem falls back to its default cap.
    pub daily_cap: Option<f64>,
}

pub fn parse(text: &str) -> Result<CordeauInstance, anyhow::Error> {
    let mut tokens = text.split_whitespace();

    let problem_type = next_u32(&mut tokens, "problem type")?;
    if problem_type != PROBLEM_TYPE_MDVRP {
        bail!("unrecognized problem type: {problem_type} - only MDVRP (2) is valid");
    }

    let nvehicles = next_usize(&mut tokens, "vehicle count")?;
    let ncustomers = next_usize(&mut tokens, "customer count")?;
    let ndepots = next_usize(&mut tokens, "depot count")?;

    // One `max_duration max_load` line per vehicle. The max duration bounds
    // tour length; loads belong to the capacitated variant and are ignored.
    let mut daily_cap = None;
    for i in 0..nvehicles {
        let max_duration = next_f64(&mut tokens, "vehicle max duration")?;
        let _max_load = next_f64(&mut tokens, "vehicle max load")?;

        if i == 0 && max_duration > 0.0 {
            daily_cap = Some(max_duration);
        }
    }

    let mut customers = Vec::with_capacity(ncustomers);
    let mut depots = Vec::with_capacity(ndepots);

    for i in 0..ncustomers + ndepots {
        let id = next_u32(&mut tokens, "vertex id")?;
        let x = next_f64(&mut tokens, "vertex x")?;
        let y = next_f64(&mut tokens, "vertex y")?;
        let service_duration = next_f64(&mut tokens, "service duration")?;

        let location = Location::from_cartesian(x, y);

        if i < ncustomers {
            customers.push(Customer::new(id, service_duration, location));
        } else {
            depots.push(Depot::new(id, location));
        }

        let _demand = next_f64(&mut tokens, "demand")?;
        let _frequency = next_usize(&mut tokens, "visit frequency")?;

        let ncombinations = next_usize(&mut tokens, "visit combination count")?;
        for _ in 0..ncombinations {
            next_usize(&mut tokens, "visit combination")?;
        }
    }

    Ok(CordeauInstance {
        customers,
        depots,
        daily_cap,
    })
}

fn next_token<'a, I>(tokens: &mut I, what: &str) -> Result<&'a str, anyhow::Error>
where
    I: Iterator<Item = &'a str>,
{
    tokens
        .next()
        .with_context(|| format!("unexpected end of input while reading {what}"))
}

fn next_u32<'a, I>(tokens: &mut I, what: &str) -> Result<u32, anyhow::Error>
where
    I: Iterator<Item = &'a str>,
{
    let token = next_token(tokens, what)?;
    token
        .parse()
        .with_context(|| format!("invalid {what}: {token}"))
}

fn next_usize<'a, I>(tokens: &mut I, what: &str) -> Result<usize, anyhow::Error>
where
    I: Iterator<Item = &'a str>,
{
    let token = next_token(tokens, what)?;
    token
        .parse()
        .with_context(|| format!("invalid {what}: {token}"))
}

fn next_f64<'a, I>(tokens: &mut I, what: &str) -> Result<f64, anyhow::Error>
where
    I: Iterator<Item = &'a str>,
{
    let token = next_token(tokens, what)?;
    token
        .parse()
        .with_context(|| format!("invalid {what}: {token}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two vehicles, three customers, two depots, in the positional layout of
    // the p01-style benchmark files.
    const SAMPLE: &str = "\
2 2 3 2
80 100
80 100
1 10 10 5 0 1 1 1
2 20 10 5 0 1 1 1
3 10 20 5 0 1 1 1
4 0 0 0 0 0 0
5 30 30 0 0 0 0
";

    #[test]
    fn test_parse() {
        let instance = parse(SAMPLE).unwrap();

        assert_eq!(instance.customers.len(), 3);
        assert_eq!(instance.depots.len(), 2);
        assert_eq!(instance.daily_cap, Some(80.0));

        assert_eq!(instance.customers[0].external_id(), 1);
        assert_eq!(instance.customers[0].location().x(), 10.0);
        assert_eq!(instance.customers[0].location().y(), 10.0);
        assert_eq!(instance.customers[0].service_duration(), 5.0);

        assert_eq!(instance.depots[1].external_id(), 5);
        assert_eq!(instance.depots[1].location().x(), 30.0);
    }

    #[test]
    fn test_parse_rejects_non_mdvrp_marker() {
        let err = parse("1 1 1 1\n0 100\n").unwrap_err();

        assert!(err.to_string().contains("only MDVRP"));
    }

    #[test]
    fn test_parse_rejects_truncated_input() {
        let truncated = "2 2 3 2\n80 100\n80 100\n1 10 10 5";
        let err = parse(truncated).unwrap_err();

        assert!(err.to_string().contains("unexpected end of input"));
    }

    #[test]
    fn test_parse_unconstrained_duration_has_no_cap() {
        let sample = "2 1 1 1\n0 100\n1 5 5 2 0 1 1 1\n2 0 0 0 0 0 0\n";
        let instance = parse(sample).unwrap();

        assert_eq!(instance.daily_cap, None);
    }
}
