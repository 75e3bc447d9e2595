use std::cell::Cell;

use cvclicker::{
    ClickerError, ClickerResult, Frame, FrameView, LocateConfig, Match, MatchResult, Point,
    TargetLocator, TemplateMatcher,
};

/// Matcher replaying a fixed sequence of results, one per call.
struct ScriptedMatcher {
    script: Vec<MatchResult>,
    template: (usize, usize),
    calls: Cell<usize>,
}

impl ScriptedMatcher {
    fn new(script: Vec<MatchResult>, template: (usize, usize)) -> Self {
        Self {
            script,
            template,
            calls: Cell::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl TemplateMatcher for ScriptedMatcher {
    fn match_frame(&self, _frame: FrameView<'_>) -> ClickerResult<MatchResult> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        Ok(self
            .script
            .get(call)
            .copied()
            .unwrap_or(MatchResult::NotFound))
    }

    fn template_size(&self) -> (usize, usize) {
        self.template
    }
}

fn found(x: usize, y: usize, confidence: f32) -> MatchResult {
    MatchResult::Found(Match { x, y, confidence })
}

fn screen() -> ClickerResult<Frame> {
    Frame::filled(64, 48, [0, 0, 0])
}

#[test]
fn fifth_frame_above_threshold_is_located() {
    let script = vec![
        found(3, 4, 0.5),
        found(3, 4, 0.5),
        found(3, 4, 0.5),
        found(3, 4, 0.5),
        found(100, 100, 0.95),
    ];
    let matcher = ScriptedMatcher::new(script, (50, 50));
    let cfg = LocateConfig {
        max_attempts: 5,
        confidence_threshold: 0.9,
    };
    let locator = TargetLocator::new(&matcher, cfg).unwrap();

    let mut captures = 0;
    let target = locator
        .locate_target(|| {
            captures += 1;
            screen()
        })
        .unwrap();
    assert_eq!(target, Some(Point::new(125, 125)));
    assert_eq!(captures, 5);
    assert_eq!(matcher.calls(), 5);
}

#[test]
fn confidence_equal_to_threshold_is_rejected() {
    let matcher = ScriptedMatcher::new(vec![found(1, 1, 0.8), found(2, 2, 0.8)], (4, 4));
    let cfg = LocateConfig {
        max_attempts: 2,
        confidence_threshold: 0.8,
    };
    let locator = TargetLocator::new(&matcher, cfg).unwrap();
    assert_eq!(locator.locate(screen).unwrap(), MatchResult::NotFound);
}

#[test]
fn attempts_are_bounded() {
    let matcher = ScriptedMatcher::new(vec![found(0, 0, 0.99); 10], (4, 4));
    let cfg = LocateConfig {
        max_attempts: 3,
        confidence_threshold: 1.0,
    };
    let locator = TargetLocator::new(&matcher, cfg).unwrap();

    let mut captures = 0;
    let result = locator
        .locate(|| {
            captures += 1;
            screen()
        })
        .unwrap();
    assert_eq!(result, MatchResult::NotFound);
    assert_eq!(captures, 3);
    assert_eq!(matcher.calls(), 3);
}

#[test]
fn first_confident_match_stops_the_search() {
    let matcher = ScriptedMatcher::new(vec![found(7, 9, 0.85), found(1, 1, 0.99)], (10, 10));
    let locator = TargetLocator::new(&matcher, LocateConfig::default()).unwrap();
    let result = locator.locate(screen).unwrap().found().unwrap();
    assert_eq!((result.x, result.y), (7, 9));
    assert_eq!(matcher.calls(), 1);
}

#[test]
fn capture_failure_consumes_an_attempt() {
    let matcher = ScriptedMatcher::new(vec![found(10, 20, 0.95)], (30, 40));
    let cfg = LocateConfig {
        max_attempts: 2,
        confidence_threshold: 0.8,
    };
    let locator = TargetLocator::new(&matcher, cfg).unwrap();

    let mut captures = 0;
    let target = locator
        .locate_target(|| {
            captures += 1;
            if captures == 1 {
                return Err(ClickerError::Capture {
                    reason: "display busy".into(),
                });
            }
            screen()
        })
        .unwrap();
    assert_eq!(target, Some(Point::new(25, 40)));
    assert_eq!(captures, 2);

    let failing = ScriptedMatcher::new(vec![found(10, 20, 0.95)], (30, 40));
    let locator = TargetLocator::new(&failing, cfg).unwrap();
    let result = locator
        .locate(|| {
            Err(ClickerError::Capture {
                reason: "no display".into(),
            })
        })
        .unwrap();
    assert_eq!(result, MatchResult::NotFound);
    assert_eq!(failing.calls(), 0);
}

#[test]
fn fatal_capture_errors_propagate() {
    let matcher = ScriptedMatcher::new(vec![found(0, 0, 0.99)], (4, 4));
    let locator = TargetLocator::new(&matcher, LocateConfig::default()).unwrap();

    let mut captures = 0;
    let err = locator
        .locate(|| {
            captures += 1;
            Err(ClickerError::RoiOutOfBounds {
                x: 1900,
                y: 0,
                width: 100,
                height: 100,
                img_width: 1920,
                img_height: 1080,
            })
        })
        .err()
        .unwrap();
    assert!(err.is_invalid_input());
    assert_eq!(captures, 1);
}

#[test]
fn zero_attempts_are_rejected() {
    let matcher = ScriptedMatcher::new(Vec::new(), (4, 4));
    let cfg = LocateConfig {
        max_attempts: 0,
        confidence_threshold: 0.8,
    };
    let err = TargetLocator::new(&matcher, cfg).err().unwrap();
    assert!(err.is_invalid_input());
}

#[test]
fn cancellation_is_checked_before_each_attempt() {
    let matcher = ScriptedMatcher::new(vec![found(0, 0, 0.5); 5], (4, 4));
    let locator = TargetLocator::new(&matcher, LocateConfig::default()).unwrap();

    let mut captures = 0;
    let result = locator
        .locate_with_cancel(
            || {
                captures += 1;
                screen()
            },
            || matcher.calls() >= 2,
        )
        .unwrap();
    assert_eq!(result, MatchResult::NotFound);
    assert_eq!(captures, 2);
    assert_eq!(matcher.calls(), 2);
}

#[test]
fn cancelled_before_start_never_captures() {
    let matcher = ScriptedMatcher::new(vec![found(10, 10, 0.99)], (4, 4));
    let locator = TargetLocator::new(&matcher, LocateConfig::default()).unwrap();

    let mut captures = 0;
    let target = locator
        .locate_target_with_cancel(
            || {
                captures += 1;
                screen()
            },
            || true,
        )
        .unwrap();
    assert_eq!(target, None);
    assert_eq!(captures, 0);
    assert_eq!(matcher.calls(), 0);
}
