use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use tempfile::TempDir;

use innkeep::config::{Config, ConfigBuilder};
use innkeep::database::{Database, DatabaseConfig};
use innkeep::operations::{has_conflict, list_availability, price};
use innkeep::{
    CreateReservation, GuestDetails, Money, ReservationManager, RoomCatalog, RoomSpec, StayDates,
};

const BOOKING_COUNTS: &[u64] = &[10, 100, 500];
const ROOM_COUNTS: &[usize] = &[10, 50, 200];

fn benchmark_config() -> Config {
    ConfigBuilder::new()
        .skip_env()
        .skip_files()
        .with_default_tax_rate(Decimal::TEN)
        .build()
        .expect("failed to build benchmark configuration")
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")
}

fn setup_database() -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("failed to create temporary directory");
    let db_path = temp_dir.path().join("innkeep.db");
    let db = Database::open(DatabaseConfig::new(&db_path)).expect("failed to open database");
    (temp_dir, db)
}

fn add_rooms(db: &mut Database, count: usize) -> Vec<i64> {
    let mut catalog = RoomCatalog::new(db);
    (0..count)
        .map(|i| {
            catalog
                .create_room(&RoomSpec::new(format!("{}", 100 + i), "Standard", Money::new(9500, 2)))
                .expect("failed to add room")
                .id
        })
        .collect()
}

/// Books `count` back-to-back two-night stays on one room.
fn populate_bookings(db: &mut Database, config: &Config, room_id: i64, count: u64) {
    let mut manager = ReservationManager::new(db, config);
    for i in 0..count {
        let check_in = base_date() + Days::new(i * 2);
        manager
            .create(
                CreateReservation::new(room_id, check_in, check_in + Days::new(2), 0, 1)
                    .for_guest(GuestDetails::new("Bench Guest", "0000")),
            )
            .expect("failed to create booking");
    }
}

fn bench_price(c: &mut Criterion) {
    c.bench_function("price", |b| {
        b.iter(|| {
            price(
                black_box(7),
                black_box(Money::new(12345, 2)),
                black_box(Decimal::new(125, 1)),
                black_box(Money::new(1500, 2)),
            )
        });
    });
}

fn bench_has_conflict(c: &mut Criterion) {
    let config = benchmark_config();
    let mut group = c.benchmark_group("has_conflict");

    for &count in BOOKING_COUNTS {
        let (_temp_dir, mut db) = setup_database();
        let room_id = add_rooms(&mut db, 1)[0];
        populate_bookings(&mut db, &config, room_id, count);
        let window = StayDates::new(base_date() + Days::new(count), base_date() + Days::new(count + 3))
            .expect("valid stay");

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| has_conflict(db.connection(), room_id, black_box(&window), None));
        });
    }

    group.finish();
}

fn bench_create_reservation(c: &mut Criterion) {
    let config = benchmark_config();

    c.bench_function("create_reservation", |b| {
        b.iter_batched(
            || {
                let (temp_dir, mut db) = setup_database();
                let room_id = add_rooms(&mut db, 1)[0];
                (temp_dir, db, room_id)
            },
            |(temp_dir, mut db, room_id)| {
                let _temp_dir = temp_dir;
                let created = ReservationManager::new(&mut db, &config)
                    .create(
                        CreateReservation::new(room_id, base_date(), base_date() + Days::new(3), 0, 1)
                            .for_guest(GuestDetails::new("Bench Guest", "0000")),
                    )
                    .expect("failed to create reservation");
                black_box(created);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_list_availability(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_availability");

    for &rooms in ROOM_COUNTS {
        let (_temp_dir, mut db) = setup_database();
        add_rooms(&mut db, rooms);
        let stay = StayDates::new(base_date(), base_date() + Days::new(5)).expect("valid stay");

        group.bench_with_input(BenchmarkId::from_parameter(rooms), &rooms, |b, _| {
            b.iter(|| list_availability(db.connection(), black_box(&stay)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_price,
    bench_has_conflict,
    bench_create_reservation,
    bench_list_availability
);
criterion_main!(benches);
