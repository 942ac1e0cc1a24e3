//! Output file writer. Ported from
//! `original_source/CarSharing/Solution.py::Solution.save`.

use std::collections::HashSet;
use std::io::Write;

use tracing::warn;

use crate::domain::Solution;
use crate::error::CarshareError;

/// Write `solution` in the same section-header format [`super::parser`]
/// reads: cost on its own line, then `+Vehicle assignments`,
/// `+Assigned requests`, `+Unassigned requests`.
///
/// Any car never claimed by a zone during the run is deployed to the
/// problem's first zone so that a downstream verifier sees every
/// vehicle accounted for, exactly as the original does.
pub fn write_solution(writer: &mut impl Write, solution: &Solution) -> Result<(), CarshareError> {
    let cost = solution.cost.unwrap_or(0);
    writeln!(writer, "{cost}")?;

    writeln!(writer, "+Vehicle assignments")?;
    for (car, zone) in solution.car_zone.iter() {
        writeln!(writer, "{car};{}", zone.id)?;
    }

    let assigned_cars: HashSet<&String> = solution.car_zone.keys().collect();
    let unassigned_cars: Vec<&String> = solution
        .problem
        .vehicles
        .iter()
        .filter(|car| !assigned_cars.contains(car))
        .collect();
    if !unassigned_cars.is_empty() {
        if let Some(first_zone) = solution.problem.zones.first() {
            warn!(?unassigned_cars, "there are unassigned cars");
            for car in &unassigned_cars {
                writeln!(writer, "{car};{}", first_zone.id)?;
            }
        }
    }

    writeln!(writer, "+Assigned requests")?;
    for (&req_index, car) in solution.req_car.iter() {
        writeln!(writer, "{};{car}", solution.problem.requests[req_index].id)?;
    }

    writeln!(writer, "+Unassigned requests")?;
    for req_index in solution.unassigned_indices() {
        writeln!(writer, "{}", solution.problem.requests[req_index].id)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Problem, Request, Zone};
    use std::sync::Arc;

    #[test]
    fn writes_unassigned_cars_to_the_first_zone() {
        let zone_a = Arc::new(Zone::new("A", HashSet::new()));
        let request = Request::new(
            "r1",
            Arc::clone(&zone_a),
            0,
            0,
            60,
            vec!["v1".to_string()],
            100,
            50,
            0,
        );
        let problem = Arc::new(Problem::new(
            vec![request],
            vec![zone_a.clone()],
            vec!["v1".to_string(), "v2".to_string()],
            1,
        ));
        let mut solution = Solution::new(Arc::clone(&problem));
        solution.car_zone.insert("v1".to_string(), zone_a);
        solution.req_car.insert(0, "v1".to_string());
        solution.cost = Some(0);

        let mut buf = Vec::new();
        write_solution(&mut buf, &solution).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(output.contains("v2;A"));
        assert!(output.contains("r1;v1"));
        assert!(output.contains("+Unassigned requests"));
    }
}
