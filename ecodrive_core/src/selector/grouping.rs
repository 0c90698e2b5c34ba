use ecodrive_lib::trip::TripRecord;
use serde::Serialize;

/// A run of consecutive trips logged at the same "HH:MM".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGroup<'a> {
    pub time: &'a str,
    pub trips: &'a [TripRecord],
}

/// Whether a time header precedes each trip. Input order is kept as is.
pub fn time_headers(trips: &[TripRecord]) -> Vec<bool> {
    trips.iter()
        .enumerate()
        .map(|(i, trip)| i == 0 || trips[i - 1].time != trip.time)
        .collect()
}

pub fn time_groups(trips: &[TripRecord]) -> Vec<TimeGroup<'_>> {
    trips.chunk_by(|a, b| a.time == b.time)
        .map(|run| TimeGroup {
            time: &run[0].time,
            trips: run,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(id: &str, time: &str) -> TripRecord {
        TripRecord::new(id, format!("Trip {id}"), time, 1.0, 0)
    }

    #[test]
    fn shared_time_shares_header() {
        let trips = [trip("1", "08:30"), trip("2", "08:30"), trip("3", "20:15")];
        assert_eq!(time_headers(&trips), [true, false, true]);
    }

    #[test]
    fn no_resorting() {
        let trips = [trip("1", "09:00"), trip("2", "08:00"), trip("3", "09:00")];
        assert_eq!(time_headers(&trips), [true, true, true]);

        let groups = time_groups(&trips);
        assert_eq!(groups.iter().map(|group| group.time).collect::<Vec<_>>(), ["09:00", "08:00", "09:00"]);
    }

    #[test]
    fn groups_follow_headers() {
        let trips = [trip("1", "08:30"), trip("2", "08:30"), trip("3", "20:15")];
        let groups = time_groups(&trips);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].time, "08:30");
        assert_eq!(groups[0].trips.len(), 2);
        assert_eq!(groups[1].trips[0].id, "3");
    }

    #[test]
    fn empty_day() {
        assert!(time_headers(&[]).is_empty());
        assert!(time_groups(&[]).is_empty());
    }
}
