//! On-target checks for the rig's pure logic: scale calibration, weight
//! colouring and formatting, and wipe stepping.

#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(executor = esp_hal_embassy::Executor::new())]
mod tests {
    use grove_demo_rig::animations::{Animation, WipeAnimation, next_buffer, weight_rainbow};
    use grove_demo_rig::maths::{format_weight, pixel_hue, weight_hue};
    use grove_demo_rig::scale::{Calibration, DEFAULT_REFERENCE_UNIT};
    use grove_demo_rig::{LED_STRING_SIZE, MAX_WEIGHT_DG};
    use smart_leds::RGB8;
    use smart_leds::hsv::{Hsv, hsv2rgb};

    #[init]
    fn init() {
        let peripherals = esp_hal::init(esp_hal::Config::default());
        let timer0 = esp_hal::timer::systimer::SystemTimer::new(peripherals.SYSTIMER);
        esp_hal_embassy::init(timer0.alarm0);
    }

    #[test]
    fn tare_zeroes_the_reading() {
        let mut cal = Calibration::default();
        assert_eq!(cal.reference_unit(), DEFAULT_REFERENCE_UNIT);
        cal.tare(123_456);
        assert_eq!(cal.weight_dg(123_456), 0);
        // 2100 counts at 210 counts/gram is 10 grams
        assert_eq!(cal.weight_dg(123_456 + 2_100), 100);
        assert_eq!(cal.weight_dg(123_456 - 2_100), -100);
    }

    #[test]
    fn calibration_rederives_the_reference_unit() {
        let mut cal = Calibration::new(1_000, DEFAULT_REFERENCE_UNIT);
        // 100 grams of known weight raising the reading by 21_000 counts
        let unit = cal.calibrate(22_000, 1_000);
        assert_eq!(unit, 210.0);
        assert_eq!(cal.weight_dg(22_000), 1_000);
        assert_eq!(cal.weight_dg(1_000), 0);
    }

    #[test]
    fn weight_formats_with_one_decimal() {
        assert_eq!(format_weight(1_234).as_str(), "123.4 g");
        assert_eq!(format_weight(0).as_str(), "0.0 g");
        // The sign survives even when the whole-gram part is zero
        assert_eq!(format_weight(-5).as_str(), "-0.5 g");
        assert_eq!(format_weight(-1_234).as_str(), "-123.4 g");
    }

    #[test]
    fn weight_hue_spans_most_of_the_wheel() {
        assert_eq!(weight_hue(0), 0);
        assert_eq!(weight_hue(MAX_WEIGHT_DG / 2), 102);
        assert_eq!(weight_hue(MAX_WEIGHT_DG), 204);
        // Out-of-range readings clamp instead of wrapping
        assert_eq!(weight_hue(-500), 0);
        assert_eq!(weight_hue(MAX_WEIGHT_DG * 2), 204);
    }

    #[test]
    fn pixel_hue_sweeps_across_the_strip() {
        assert_eq!(pixel_hue(0, 0), 0);
        let last = pixel_hue(0, LED_STRING_SIZE - 1);
        assert!(last > 0 && last <= 76);
        // The sweep wraps around the hue wheel rather than saturating
        assert_eq!(pixel_hue(250, LED_STRING_SIZE - 1), last.wrapping_add(250));
    }

    #[test]
    fn weight_rainbow_starts_at_the_base_hue() {
        let buffer = weight_rainbow(MAX_WEIGHT_DG / 2);
        let expected = hsv2rgb(Hsv {
            hue: weight_hue(MAX_WEIGHT_DG / 2),
            sat: 255,
            val: 255,
        });
        assert_eq!(buffer[0], expected);
    }

    #[test]
    fn wipe_paints_one_more_pixel_per_step() {
        let red = RGB8 { r: 255, g: 0, b: 0 };
        let mut anim = Animation::Wipe(WipeAnimation::new(red));

        let first = next_buffer(&mut anim).unwrap();
        assert_eq!(first[0], red);
        assert_eq!(first[1], RGB8::default());

        let mut frames = 1;
        while let Some(frame) = next_buffer(&mut anim) {
            frames += 1;
            assert_eq!(frame[frames - 1], red);
        }
        // One frame per pixel, then the iterator is done
        assert_eq!(frames, LED_STRING_SIZE);
        assert!(next_buffer(&mut anim).is_none());
    }
}
