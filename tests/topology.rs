//! Host-level tests for the segment topology tables.

use nixie_kit::{
    DIGIT_COUNT, Digit, Dot, SEGMENT_COUNT, Segment, SegmentTopology, Tube, TubeFamily,
};

fn digit(value: u8) -> Digit {
    Digit::new(value).expect("test digit is in range")
}

fn assert_covers_every_segment_once(topology: &SegmentTopology) {
    let mut indexes: Vec<u8> = topology.segments().map(Segment::index).collect();
    indexes.sort_unstable();
    assert_eq!(indexes, (0..64).collect::<Vec<u8>>());
    assert_eq!(topology.segments().count(), SEGMENT_COUNT);
}

#[test]
fn both_tables_are_permutations_of_the_chain() {
    assert_covers_every_segment_once(&SegmentTopology::IN12);
    assert_covers_every_segment_once(&SegmentTopology::Z570M);
}

#[test]
fn dots_never_alias_digit_glyphs() {
    for topology in [SegmentTopology::IN12, SegmentTopology::Z570M] {
        for dot in Dot::ALL {
            let dot_segment = topology.dot(dot);
            for tube in Tube::ALL {
                assert!(
                    !topology.tube_segments(tube).contains(&dot_segment),
                    "{dot:?} aliases a glyph of {tube:?}"
                );
            }
        }
    }
}

#[test]
fn both_families_share_dot_wiring() {
    assert_eq!(SegmentTopology::IN12.dots(), SegmentTopology::Z570M.dots());
    assert_eq!(SegmentTopology::Z570M.dot(Dot::UpperLeft).index(), 31);
    assert_eq!(SegmentTopology::Z570M.dot(Dot::LowerLeft).index(), 30);
    assert_eq!(SegmentTopology::Z570M.dot(Dot::UpperRight).index(), 63);
    assert_eq!(SegmentTopology::Z570M.dot(Dot::LowerRight).index(), 62);
}

#[test]
fn in12_wiring_spot_checks() {
    const IN12: SegmentTopology = SegmentTopology::IN12;
    assert_eq!(IN12.segment(Tube::HourTens, digit(0)).index(), 6);
    assert_eq!(IN12.segment(Tube::HourTens, digit(7)).index(), 9);
    assert_eq!(IN12.segment(Tube::MinuteUnits, digit(9)).index(), 39);
    assert_eq!(IN12.segment(Tube::SecondUnits, digit(6)).index(), 52);
}

#[test]
fn z570m_wiring_spot_checks() {
    const Z570M: SegmentTopology = SegmentTopology::Z570M;
    assert_eq!(Z570M.segment(Tube::HourTens, digit(0)).index(), 9);
    assert_eq!(Z570M.segment(Tube::HourTens, digit(1)).index(), 0);
    assert_eq!(Z570M.segment(Tube::SecondTens, digit(0)).index(), 51);
    assert_eq!(Z570M.segment(Tube::SecondUnits, digit(9)).index(), 60);
}

#[test]
fn tube_segments_are_indexed_by_digit() {
    let topology = TubeFamily::DEFAULT.topology();
    for tube in Tube::ALL {
        let glyphs = topology.tube_segments(tube);
        assert_eq!(glyphs.len(), DIGIT_COUNT);
        for (value, glyph) in (0..10).zip(glyphs) {
            assert_eq!(*glyph, topology.segment(tube, digit(value)));
        }
    }
}

#[test]
fn default_family_follows_feature() {
    if cfg!(feature = "in12") {
        assert_eq!(TubeFamily::DEFAULT, TubeFamily::In12);
    } else {
        assert_eq!(TubeFamily::DEFAULT, TubeFamily::Z570M);
    }
    assert_eq!(TubeFamily::In12.topology(), SegmentTopology::IN12);
}
