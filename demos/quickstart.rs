use chrono::{Local, Utc};
use soltime::{
    ClockMode, ConversionRequest, GeoCoordinate, MetricTime, SolarClock, SpaSunriseSunset,
    TimeConverter, TimeRepresentationKind,
};

fn main() -> soltime::Result<()> {
    let greenwich = GeoCoordinate::new(51.4769, 0.0)?;

    let mut clock = SolarClock::new(Local, SpaSunriseSunset).with_location(greenwich);
    let snap = clock.tick();
    println!(
        "civil: {} ({})",
        snap.civil.clock.display(ClockMode::TwelveHour),
        snap.civil.metric
    );
    match snap.solar.value() {
        Some(solar) => println!(
            "solar: {} ({}), delta {}",
            solar.now.clock.display(ClockMode::TwelveHour),
            solar.now.metric,
            solar.delta
        ),
        None => println!("solar: {}", soltime::reading::UNAVAILABLE_TEXT),
    }

    let noon = ConversionRequest::SolarMetric(MetricTime::new(5_000)?);
    let result =
        TimeConverter::new(Local).convert(noon, Utc::now().date_naive(), Some(&greenwich))?;
    for kind in TimeRepresentationKind::ALL {
        println!("{kind}: {}", result.render(kind, ClockMode::TwentyFourHour));
    }
    Ok(())
}
