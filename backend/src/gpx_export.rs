use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment};

use crate::error::PinMapError;
use crate::models::{Coordinate, RouteSegment, Waypoint};

const CREATOR: &str = "pinmap";

/// One GPX waypoint per pin and one track segment per drawn route segment.
pub fn build_gpx(waypoints: &[Waypoint], segments: &[RouteSegment]) -> Gpx {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.into()),
        ..Default::default()
    };

    for pin in waypoints {
        let mut point = to_gpx_point(&pin.coordinate);
        point.name = Some(pin.label.clone());
        gpx.waypoints.push(point);
    }

    let mut track = Track {
        name: Some("walking route".into()),
        ..Default::default()
    };
    let mut ordered: Vec<&RouteSegment> = segments.iter().collect();
    ordered.sort_by_key(|s| s.index);
    for segment in ordered {
        let mut track_segment = TrackSegment::new();
        track_segment
            .points
            .extend(segment.geometry.iter().map(to_gpx_point));
        track.segments.push(track_segment);
    }
    gpx.tracks.push(track);
    gpx
}

pub fn write_gpx(
    waypoints: &[Waypoint],
    segments: &[RouteSegment],
    out: impl std::io::Write,
) -> Result<(), PinMapError> {
    gpx::write(&build_gpx(waypoints, segments), out)?;
    Ok(())
}

pub fn encode_route_as_gpx(
    waypoints: &[Waypoint],
    segments: &[RouteSegment],
) -> Result<String, PinMapError> {
    let mut buffer = Vec::new();
    write_gpx(waypoints, segments, &mut buffer)?;
    Ok(BASE64.encode(buffer))
}

fn to_gpx_point(coord: &Coordinate) -> gpx::Waypoint {
    gpx::Waypoint::new(Point::new(coord.lon, coord.lat))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(label: &str, lat: f64, lon: f64) -> Waypoint {
        Waypoint {
            label: label.into(),
            coordinate: Coordinate::new(lat, lon),
        }
    }

    fn segment(index: usize, from: &Waypoint, to: &Waypoint) -> RouteSegment {
        RouteSegment {
            index,
            from: from.clone(),
            to: to.clone(),
            distance_m: 100.0,
            duration_s: 72.0,
            geometry: vec![from.coordinate, to.coordinate],
        }
    }

    #[test]
    fn gpx_has_pins_and_ordered_segments() {
        let pins = [pin("A", 48.85, 2.35), pin("B", 48.86, 2.36), pin("C", 48.87, 2.37)];
        let segments = [segment(1, &pins[1], &pins[2]), segment(0, &pins[0], &pins[1])];

        let gpx = build_gpx(&pins, &segments);

        assert_eq!(gpx.waypoints.len(), 3);
        assert_eq!(gpx.waypoints[2].name.as_deref(), Some("C"));
        let track = &gpx.tracks[0];
        assert_eq!(track.segments.len(), 2);
        let first = track.segments[0].points[0].point();
        assert_eq!((first.y(), first.x()), (48.85, 2.35));
    }

    #[test]
    fn encoded_gpx_decodes_to_xml() {
        let pins = [pin("A", 48.85, 2.35), pin("B", 48.86, 2.36)];
        let encoded = encode_route_as_gpx(&pins, &[segment(0, &pins[0], &pins[1])]).unwrap();

        let xml = String::from_utf8(BASE64.decode(encoded).unwrap()).unwrap();
        assert!(xml.contains("<gpx"));
        assert!(xml.contains("<trkseg>"));
        assert!(xml.contains("pinmap"));
    }

    #[test]
    fn written_file_reads_back() {
        let pins = [pin("A", 48.85, 2.35), pin("B", 48.86, 2.36)];
        let file = tempfile::NamedTempFile::new().unwrap();
        write_gpx(&pins, &[segment(0, &pins[0], &pins[1])], file.as_file()).unwrap();

        let parsed = gpx::read(std::fs::File::open(file.path()).unwrap()).unwrap();
        assert_eq!(parsed.waypoints[0].name.as_deref(), Some("A"));
        assert_eq!(parsed.tracks[0].segments[0].points.len(), 2);
    }
}
