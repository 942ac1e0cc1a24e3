//! Input file format reader. Ported from
//! `original_source/CarSharing/input_parser.py::parse_input`.
//!
//! The format is a sequence of `+Section: <count>` headers followed by
//! that many semicolon-delimited records:
//!
//! ```text
//! +Requests: 2
//! r1;A;0;0;60;v1,v2;100;50
//! r2;B;0;30;45;v1;80;40
//! +Zones: 2
//! A;B
//! B;A
//! +Vehicles: 2
//! v1
//! v2
//! +Days: 1
//! ```

use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::sync::Arc;

use crate::domain::{Problem, Request, Solution, Zone};
use crate::error::CarshareError;

/// Parse a full problem instance from `reader`. Returns an error on
/// malformed records or a request referencing an unknown zone.
pub fn parse_input(reader: impl BufRead) -> Result<Problem, CarshareError> {
    let mut raw_requests: Vec<RawRequest> = Vec::new();
    let mut zones: Vec<Arc<Zone>> = Vec::new();
    let mut vehicles: Vec<String> = Vec::new();
    let mut days: u32 = 0;

    let mut lines = reader.lines();
    while let Some(line) = lines.next() {
        let line = line?;

        if let Some(amount) = section_count(&line, "+Requests:") {
            for _ in 0..amount {
                let record = next_line(&mut lines)?;
                raw_requests.push(parse_request_record(&record, raw_requests.len())?);
            }
        } else if let Some(amount) = section_count(&line, "+Zones:") {
            for _ in 0..amount {
                let record = next_line(&mut lines)?;
                zones.push(Arc::new(parse_zone_record(&record)?));
            }
        } else if let Some(amount) = section_count(&line, "+Vehicles:") {
            for _ in 0..amount {
                vehicles.push(next_line(&mut lines)?.trim().to_string());
            }
        } else if line.contains("+Days") {
            days = line
                .split(' ')
                .nth(1)
                .ok_or_else(|| CarshareError::InputMalformed("malformed +Days header".into()))?
                .parse()
                .map_err(|_| CarshareError::InputMalformed("non-integer +Days value".into()))?;
        }
    }

    let zone_map: HashMap<String, Arc<Zone>> =
        zones.iter().map(|z| (z.id.clone(), Arc::clone(z))).collect();

    let mut requests = Vec::with_capacity(raw_requests.len());
    for raw in raw_requests {
        let zone = zone_map.get(&raw.zone_id).cloned().ok_or_else(|| {
            CarshareError::InputMalformed(format!(
                "request {} references unknown zone {}",
                raw.id, raw.zone_id
            ))
        })?;
        requests.push(Request::new(
            raw.id,
            zone,
            raw.day,
            raw.start,
            raw.duration,
            raw.vehicles,
            raw.penalty1,
            raw.penalty2,
            raw.index,
        ));
    }

    Ok(Problem::new(requests, zones, vehicles, days))
}

/// Parse a `Solution` back out of the §6 output format written by
/// [`super::writer::write_solution`], against an already-loaded
/// `problem`. Used to round-trip a solution across a worker's private
/// sink, and to verify L2 (write then read preserves `req_car`,
/// `car_zone`, and `cost`).
pub fn parse_solution(reader: impl BufRead, problem: &Arc<Problem>) -> Result<Solution, CarshareError> {
    let mut lines = reader.lines();
    let cost_line = next_line(&mut lines)?;
    let cost: i64 = cost_line.trim().parse().map_err(|_| {
        CarshareError::InputMalformed(format!("non-integer cost line: {cost_line:?}"))
    })?;

    let mut solution = Solution::new(Arc::clone(problem));
    let mut section: Option<Section> = None;

    for line in lines {
        let line = line?;
        if line.contains("+Vehicle assignments") {
            section = Some(Section::VehicleAssignments);
            continue;
        }
        if line.contains("+Assigned requests") {
            section = Some(Section::AssignedRequests);
            continue;
        }
        if line.contains("+Unassigned requests") {
            section = Some(Section::UnassignedRequests);
            continue;
        }

        match section {
            Some(Section::VehicleAssignments) => {
                let (car, zone_id) = split_pair(&line)?;
                let zone = problem.zone_map.get(&zone_id).cloned().ok_or_else(|| {
                    CarshareError::InputMalformed(format!("unknown zone {zone_id} for car {car}"))
                })?;
                solution.car_zone.insert(car, zone);
            }
            Some(Section::AssignedRequests) => {
                let (req_id, car) = split_pair(&line)?;
                let req_index = *problem.request_map.get(&req_id).ok_or_else(|| {
                    CarshareError::InputMalformed(format!("unknown request {req_id}"))
                })?;
                solution.req_car.insert(req_index, car);
            }
            Some(Section::UnassignedRequests) | None => {
                // Unassigned requests are implied by absence from
                // req_car; nothing to record here.
            }
        }
    }

    solution.cost = Some(cost);
    Ok(solution)
}

#[derive(Clone, Copy)]
enum Section {
    VehicleAssignments,
    AssignedRequests,
    UnassignedRequests,
}

fn split_pair(line: &str) -> Result<(String, String), CarshareError> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if fields.len() != 2 {
        return Err(CarshareError::InputMalformed(format!(
            "expected 2 semicolon-separated fields, got {}: {line:?}",
            fields.len()
        )));
    }
    Ok((fields[0].to_string(), fields[1].to_string()))
}

struct RawRequest {
    id: String,
    zone_id: String,
    day: u32,
    start: u32,
    duration: u32,
    vehicles: Vec<String>,
    penalty1: u64,
    penalty2: u64,
    index: usize,
}

fn section_count(line: &str, header: &str) -> Option<usize> {
    if !line.contains(header) {
        return None;
    }
    line.split(' ').nth(1)?.trim().parse().ok()
}

fn next_line(lines: &mut std::io::Lines<impl BufRead>) -> Result<String, CarshareError> {
    lines
        .next()
        .ok_or_else(|| CarshareError::InputMalformed("unexpected end of input".into()))?
        .map_err(CarshareError::from)
}

fn parse_request_record(record: &str, index: usize) -> Result<RawRequest, CarshareError> {
    let fields: Vec<&str> = record.split(';').map(str::trim).collect();
    if fields.len() != 8 {
        return Err(CarshareError::InputMalformed(format!(
            "request record has {} fields, expected 8: {record:?}",
            fields.len()
        )));
    }
    let malformed = |what: &str| CarshareError::InputMalformed(format!("{what} in {record:?}"));

    Ok(RawRequest {
        id: fields[0].to_string(),
        zone_id: fields[1].to_string(),
        day: fields[2].parse().map_err(|_| malformed("bad day"))?,
        start: fields[3].parse().map_err(|_| malformed("bad start"))?,
        duration: fields[4].parse().map_err(|_| malformed("bad duration"))?,
        vehicles: fields[5].split(',').map(|s| s.trim().to_string()).collect(),
        penalty1: fields[6].parse().map_err(|_| malformed("bad penalty1"))?,
        penalty2: fields[7].parse().map_err(|_| malformed("bad penalty2"))?,
        index,
    })
}

fn parse_zone_record(record: &str) -> Result<Zone, CarshareError> {
    let fields: Vec<&str> = record.split(';').map(str::trim).collect();
    if fields.len() != 2 {
        return Err(CarshareError::InputMalformed(format!(
            "zone record has {} fields, expected 2: {record:?}",
            fields.len()
        )));
    }
    let neighbours: HashSet<String> = fields[1]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    Ok(Zone::new(fields[0], neighbours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_a_small_instance() {
        let input = "\
+Requests: 2
r1;A;0;0;60;v1,v2;100;50
r2;B;0;30;45;v1;80;40
+Zones: 2
A;B
B;A
+Vehicles: 2
v1
v2
+Days: 1
";
        let problem = parse_input(Cursor::new(input)).unwrap();

        assert_eq!(problem.requests.len(), 2);
        assert_eq!(problem.zones.len(), 2);
        assert_eq!(problem.vehicles, vec!["v1", "v2"]);
        assert_eq!(problem.days, 1);

        let r1 = &problem.requests[0];
        assert_eq!(r1.id, "r1");
        assert_eq!(r1.zone.id, "A");
        assert_eq!(r1.candidate_vehicles, vec!["v1", "v2"]);
        assert_eq!(r1.penalty1, 100);
        assert_eq!(r1.penalty2, 50);

        assert!(problem.overlap.get(0, 1) || !problem.overlap.get(0, 1));
    }

    #[test]
    fn rejects_a_request_in_an_unknown_zone() {
        let input = "\
+Requests: 1
r1;Z;0;0;60;v1;100;50
+Zones: 1
A;
+Vehicles: 1
v1
+Days: 1
";
        assert!(parse_input(Cursor::new(input)).is_err());
    }

    #[test]
    fn l2_write_then_read_preserves_req_car_car_zone_and_cost() {
        use super::super::writer::write_solution;

        let input = "\
+Requests: 2
r1;A;0;0;60;v1,v2;100;50
r2;B;0;30;45;v1;80;40
+Zones: 2
A;B
B;A
+Vehicles: 2
v1
v2
+Days: 1
";
        let problem = Arc::new(parse_input(Cursor::new(input)).unwrap());

        let mut original = Solution::new(Arc::clone(&problem));
        original
            .car_zone
            .insert("v1".to_string(), Arc::clone(&problem.zones[0]));
        original
            .car_zone
            .insert("v2".to_string(), Arc::clone(&problem.zones[1]));
        original.req_car.insert(0, "v1".to_string());
        original.cost = Some(42);

        let mut buf = Vec::new();
        write_solution(&mut buf, &original).unwrap();

        let round_tripped = parse_solution(Cursor::new(buf), &problem).unwrap();

        let mut original_req_car: Vec<(usize, String)> = original
            .req_car
            .iter()
            .map(|(&r, c)| (r, c.clone()))
            .collect();
        original_req_car.sort();
        let mut round_tripped_req_car: Vec<(usize, String)> = round_tripped
            .req_car
            .iter()
            .map(|(&r, c)| (r, c.clone()))
            .collect();
        round_tripped_req_car.sort();
        assert_eq!(original_req_car, round_tripped_req_car);

        let mut original_car_zone: Vec<(String, String)> = original
            .car_zone
            .iter()
            .map(|(c, z)| (c.clone(), z.id.clone()))
            .collect();
        original_car_zone.sort();
        let mut round_tripped_car_zone: Vec<(String, String)> = round_tripped
            .car_zone
            .iter()
            .map(|(c, z)| (c.clone(), z.id.clone()))
            .collect();
        round_tripped_car_zone.sort();
        assert_eq!(original_car_zone, round_tripped_car_zone);

        assert_eq!(original.cost, round_tripped.cost);
    }
}
