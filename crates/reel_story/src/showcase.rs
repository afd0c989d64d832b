//! Built-in showcase sections
//!
//! The three feature showcases of the site, each a sticky track with a
//! desktop (`>=768`) and a mobile (`<768`) program. All of them scrub with
//! a one second lag.

use reel_animation::{Easing, Position, Property::*, Props, TargetStates, TimelineProgram};
use reel_layout::Breakpoint;

use crate::driver::Scrub;
use crate::error::{Result, StoryError};
use crate::section::StorySection;
use crate::variant::BreakpointVariant;

pub const APPLICATION: &str = "application";
pub const BRAND: &str = "brand";
pub const WEB: &str = "web";

/// Names of the built-in sections, in page order
pub const NAMES: [&str; 3] = [APPLICATION, BRAND, WEB];

const DESKTOP: Breakpoint = Breakpoint::MinWidth(768.0);
const MOBILE: Breakpoint = Breakpoint::Below(768.0);
const SCRUB: Scrub = Scrub::Smooth(1.0);

/// Look up a built-in section by name
pub fn by_name(name: &str) -> Result<StorySection> {
    match name {
        APPLICATION => Ok(application()),
        BRAND => Ok(brand()),
        WEB => Ok(web()),
        other => Err(StoryError::UnknownSection(other.to_string())),
    }
}

/// Every built-in section, in page order
pub fn all() -> Vec<StorySection> {
    vec![application(), brand(), web()]
}

fn props(entries: &[(reel_animation::Property, f32)]) -> Props {
    entries.iter().copied().collect()
}

/// Application development: a phone tilts up, its screen swaps label for
/// logo, then it shrinks aside while the copy reveals.
pub fn application() -> StorySection {
    let desktop = BreakpointVariant::new(
        "desktop",
        DESKTOP,
        TargetStates::new()
            .with(
                "phone",
                props(&[
                    (Scale, 1.3),
                    (RotationX, 20.0),
                    (RotationY, 0.0),
                    (Rotation, 0.0),
                    (XPercent, 0.0),
                    (YPercent, 0.0),
                ]),
            )
            .with("text", props(&[(AutoAlpha, 0.0), (Y, 50.0)]))
            .with("logo", props(&[(Rotation, 0.0)]))
            .with("screen_label", props(&[(AutoAlpha, 1.0), (Y, 0.0)]))
            .with("screen_logo", props(&[(Scale, 1.0)])),
        TimelineProgram::builder()
            .to("phone", 1.0, Easing::POWER2_OUT, props(&[(RotationX, 0.0)]))
            .to("screen_label", 0.5, Easing::POWER2_IN, props(&[(Y, -50.0), (AutoAlpha, 0.0)]))
            .to_at(
                "screen_logo",
                0.5,
                Easing::POWER2_OUT,
                props(&[(Scale, 1.5)]),
                Position::WithPrevious,
            )
            .to("phone", 1.0, Easing::POWER2_IN_OUT, props(&[(Scale, 0.8), (XPercent, -35.0)]))
            .to_at(
                "text",
                0.5,
                Easing::POWER2_OUT,
                props(&[(AutoAlpha, 1.0), (Y, 0.0)]),
                Position::Offset(-0.5),
            )
            .to_at(
                "logo",
                0.7,
                Easing::back_out(1.7),
                props(&[(Rotation, -45.0)]),
                Position::WithPrevious,
            )
            .build(),
    );

    let mobile = BreakpointVariant::new(
        "mobile",
        MOBILE,
        TargetStates::new()
            .with("phone", props(&[(Scale, 1.0), (RotationX, 10.0)]))
            .with("text", props(&[(AutoAlpha, 0.0), (Y, 30.0)])),
        TimelineProgram::builder()
            .to(
                "phone",
                1.0,
                Easing::POWER2_IN_OUT,
                props(&[(RotationX, 0.0), (Scale, 0.6), (YPercent, -35.0)]),
            )
            .to_at(
                "text",
                0.5,
                Easing::default(),
                props(&[(AutoAlpha, 1.0), (Y, 0.0)]),
                Position::Offset(-0.3),
            )
            .build(),
    );

    StorySection::new(APPLICATION, 3.0)
        .variant(desktop)
        .variant(mobile)
        .scrub(SCRUB)
}

/// Brand and marketing: two pages fan out, the stack shrinks, and copy
/// slides in from both sides.
pub fn brand() -> StorySection {
    let desktop = BreakpointVariant::new(
        "desktop",
        DESKTOP,
        TargetStates::new()
            .with("page1", props(&[(Rotation, 0.0)]))
            .with("page2", props(&[(Rotation, 0.0)]))
            .with("pages", props(&[(Scale, 1.0)]))
            .with("left_text", props(&[(AutoAlpha, 0.0), (X, 50.0)]))
            .with("right_text", props(&[(AutoAlpha, 0.0), (X, -50.0)])),
        TimelineProgram::builder()
            .to("page1", 1.0, Easing::POWER2_IN_OUT, props(&[(Rotation, -15.0)]))
            .to_at(
                "page2",
                1.0,
                Easing::POWER2_IN_OUT,
                props(&[(Rotation, 15.0)]),
                Position::WithPrevious,
            )
            .to("pages", 1.0, Easing::POWER2_IN_OUT, props(&[(Scale, 0.7)]))
            .to_at(
                "left_text",
                0.5,
                Easing::POWER2_OUT,
                props(&[(AutoAlpha, 1.0), (X, 0.0)]),
                Position::Offset(-0.5),
            )
            .to_at(
                "right_text",
                0.5,
                Easing::POWER2_OUT,
                props(&[(AutoAlpha, 1.0), (X, 0.0)]),
                Position::WithPrevious,
            )
            .build(),
    );

    let mobile = BreakpointVariant::new(
        "mobile",
        MOBILE,
        TargetStates::new()
            .with("page1", props(&[(Rotation, 0.0)]))
            .with("page2", props(&[(Rotation, 0.0)]))
            .with("pages", props(&[(Scale, 0.8)]))
            .with("left_text", props(&[(AutoAlpha, 0.0), (Y, 20.0)]))
            .with("right_text", props(&[(AutoAlpha, 0.0), (Y, 20.0)])),
        TimelineProgram::builder()
            .to("page1", 1.0, Easing::POWER2_IN_OUT, props(&[(Rotation, -10.0)]))
            .to_at(
                "page2",
                1.0,
                Easing::POWER2_IN_OUT,
                props(&[(Rotation, 10.0)]),
                Position::WithPrevious,
            )
            .to("left_text", 0.5, Easing::default(), props(&[(AutoAlpha, 1.0), (Y, 0.0)]))
            .to_at(
                "right_text",
                0.5,
                Easing::default(),
                props(&[(AutoAlpha, 1.0), (Y, 0.0)]),
                Position::WithPrevious,
            )
            .build(),
    );

    StorySection::new(BRAND, 2.5)
        .variant(desktop)
        .variant(mobile)
        .scrub(SCRUB)
}

/// Web development: a laptop fades in, swaps its screen, and moves aside
/// for the copy.
pub fn web() -> StorySection {
    let desktop = BreakpointVariant::new(
        "desktop",
        DESKTOP,
        TargetStates::new()
            .with("laptop", props(&[(Scale, 1.2), (XPercent, 0.0), (Opacity, 0.0), (Y, 50.0)]))
            .with("text", props(&[(AutoAlpha, 0.0), (X, -50.0)]))
            .with("screen_label", props(&[(AutoAlpha, 1.0), (Y, 0.0)]))
            .with("screen_logo", props(&[(Scale, 1.0)])),
        TimelineProgram::builder()
            .to("laptop", 0.5, Easing::POWER2_OUT, props(&[(Opacity, 1.0), (Y, 0.0)]))
            .to("screen_label", 0.5, Easing::POWER2_IN, props(&[(Y, -50.0), (AutoAlpha, 0.0)]))
            .to_at(
                "screen_logo",
                0.5,
                Easing::POWER2_OUT,
                props(&[(Scale, 1.5)]),
                Position::WithPrevious,
            )
            .to("laptop", 1.0, Easing::POWER2_IN_OUT, props(&[(Scale, 0.8), (XPercent, 35.0)]))
            .to_at(
                "text",
                0.5,
                Easing::POWER2_OUT,
                props(&[(AutoAlpha, 1.0), (X, 0.0)]),
                Position::Offset(-0.5),
            )
            .build(),
    );

    let mobile = BreakpointVariant::new(
        "mobile",
        MOBILE,
        TargetStates::new()
            .with("laptop", props(&[(Scale, 1.0), (YPercent, 0.0), (Opacity, 0.0)]))
            .with("text", props(&[(AutoAlpha, 0.0), (Y, 30.0)])),
        TimelineProgram::builder()
            .to("laptop", 0.3, Easing::default(), props(&[(Opacity, 1.0)]))
            .to("laptop", 1.0, Easing::POWER2_IN_OUT, props(&[(Scale, 0.6), (YPercent, -35.0)]))
            .to_at(
                "text",
                0.5,
                Easing::default(),
                props(&[(AutoAlpha, 1.0), (Y, 0.0)]),
                Position::Offset(-0.3),
            )
            .build(),
    );

    StorySection::new(WEB, 2.5)
        .variant(desktop)
        .variant(mobile)
        .scrub(SCRUB)
}
