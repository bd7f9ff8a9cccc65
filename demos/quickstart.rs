use abstime::{
    time_of_day, AbsoluteTime, DateStyle, DateTimeConfig, IntervalStyle, RelativeTime,
    TimeInterval,
};

fn main() -> abstime::Result<()> {
    let config = DateTimeConfig::in_zone("Europe/Madrid".parse()?)
        .with_date_style(DateStyle::Postgres)
        .with_interval_style(IntervalStyle::PostgresVerbose);

    let now = AbsoluteTime::now();
    let week: RelativeTime = "7 days".parse()?;
    let interval = TimeInterval::new(now, now + week);

    println!("clock:    {}", time_of_day(&config));
    println!("now:      {}", now.encode_text(&config));
    println!("interval: {}", interval.encode_text(&config));
    println!("length:   {}", interval.length().encode_text(&config));
    println!("wire:     {:02x?}", interval.to_bytes().as_ref());
    Ok(())
}
