//! Database schema definitions and SQL constants.

/// Current schema version for the database.
///
/// Stored in the metadata table and checked every time a database is opened.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value metadata, currently only the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Rooms. `room_number` is the business key.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        room_id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_number TEXT NOT NULL UNIQUE,
        room_type TEXT NOT NULL,
        rate_per_night TEXT NOT NULL,
        max_guests INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'AVAILABLE',
        description TEXT,
        image_url TEXT
    )";

/// Guests.
pub const CREATE_GUESTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS guests (
        guest_id INTEGER PRIMARY KEY AUTOINCREMENT,
        full_name TEXT NOT NULL,
        email TEXT,
        contact_number TEXT NOT NULL
    )";

/// Reservations. Money columns hold decimal text; dates hold `YYYY-MM-DD`.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        reservation_id INTEGER PRIMARY KEY AUTOINCREMENT,
        reservation_number TEXT NOT NULL UNIQUE,
        guest_id INTEGER NOT NULL REFERENCES guests(guest_id),
        room_id INTEGER NOT NULL REFERENCES rooms(room_id),
        check_in_date TEXT NOT NULL,
        check_out_date TEXT NOT NULL,
        status TEXT NOT NULL,
        notes TEXT,
        nights INTEGER NOT NULL,
        rate_per_night TEXT NOT NULL,
        subtotal TEXT NOT NULL,
        tax_rate TEXT NOT NULL,
        tax TEXT NOT NULL,
        discount TEXT NOT NULL,
        total_amount TEXT NOT NULL,
        amount_paid TEXT NOT NULL,
        payment_status TEXT NOT NULL,
        created_by INTEGER NOT NULL,
        created_at INTEGER NOT NULL,
        CHECK (check_out_date > check_in_date)
    )";

/// Payments recorded against reservations.
pub const CREATE_PAYMENTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservation_payments (
        payment_id INTEGER PRIMARY KEY AUTOINCREMENT,
        reservation_id INTEGER NOT NULL REFERENCES reservations(reservation_id),
        paid_amount TEXT NOT NULL,
        paid_at INTEGER NOT NULL,
        method TEXT,
        note TEXT,
        created_by INTEGER NOT NULL
    )";

/// Highest reservation-number suffix ever issued per check-in-date prefix.
pub const CREATE_SEQUENCES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservation_sequences (
        prefix TEXT PRIMARY KEY NOT NULL,
        last_value INTEGER NOT NULL
    )";

/// Speeds up the overlap and sync queries.
pub const CREATE_ROOM_DATES_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_reservations_room_dates \
     ON reservations(room_id, check_in_date, check_out_date)";

/// Speeds up the dashboard series.
pub const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_created_at ON reservations(created_at)";

/// Speeds up payment history and reconciliation.
pub const CREATE_PAYMENTS_RESERVATION_INDEX: &str = "CREATE INDEX IF NOT EXISTS \
     idx_reservation_payments_reservation ON reservation_payments(reservation_id)";

/// Speeds up the monthly revenue figure.
pub const CREATE_PAYMENTS_PAID_AT_INDEX: &str = "CREATE INDEX IF NOT EXISTS \
     idx_reservation_payments_paid_at ON reservation_payments(paid_at)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
