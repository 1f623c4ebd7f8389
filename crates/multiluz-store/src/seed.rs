//! # Demo Data Set
//!
//! The reference data set the dashboard ships with: 4 configured lists,
//! 5 salespeople, 5 profiles, 6 orders, 6 payments, 4 commissions.
//!
//! Down-payment due dates are relative to `today`, so the derived statuses
//! come out the same whenever the data is loaded:
//!
//! | Order   | Due          | Payments | Status     |
//! |---------|--------------|----------|------------|
//! | ORD-001 | today + 10   | 1        | Partial    |
//! | ORD-002 | today        | 2        | Partial    |
//! | ORD-003 | today − 5    | 0        | Overdue    |
//! | ORD-004 | today − 15   | 2 (paid) | Confirmed  |
//! | ORD-005 | today + 5    | 0        | Cancelled  |
//! | ORD-006 | today − 4    | 1        | Partial    |

use chrono::{Duration, NaiveDate};
use tracing::info;

use multiluz_core::{
    AppConfiguration, Commission, CommissionStatus, Money, Order, OrderStatus, Payment, Rate,
    Salesperson, UserProfile, UserRole,
};

use crate::error::StoreResult;
use crate::store::Store;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn days_from(today: NaiveDate, days: i64) -> NaiveDate {
    today.checked_add_signed(Duration::days(days)).unwrap_or(today)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Demo configuration lists.
pub fn demo_config() -> AppConfiguration {
    AppConfiguration {
        business_units: strings(&["São Paulo", "Rio de Janeiro", "Belo Horizonte", "Matriz"]),
        payment_methods: strings(&["Boleto", "Pix", "Cartão de Crédito", "Transferência"]),
        order_origins: strings(&["Indicação", "Website", "Feira", "Prospecção"]),
        salesperson_levels: strings(&["Júnior", "Pleno", "Sênior"]),
        ..AppConfiguration::with_order_statuses()
    }
}

pub fn demo_salespeople() -> Vec<Salesperson> {
    let sp = |id: &str, name: &str, unit: &str, goal: i64, level: &str, hired: NaiveDate| Salesperson {
        id: id.to_string(),
        name: name.to_string(),
        business_unit: unit.to_string(),
        sales_goal: Money::from_reais(goal),
        level: level.to_string(),
        hire_date: hired,
    };
    vec![
        sp("SP-001", "Ana Costa", "São Paulo", 100_000, "Sênior", date(2022, 1, 15)),
        sp("SP-002", "Bruno Gomes", "Rio de Janeiro", 80_000, "Pleno", date(2022, 8, 20)),
        sp("SP-003", "Carla Dias", "São Paulo", 120_000, "Sênior", date(2021, 5, 10)),
        sp("SP-004", "Diego Martins", "Belo Horizonte", 75_000, "Júnior", date(2023, 3, 1)),
        sp("SP-005", "Carlos Lima", "Matriz", 250_000, "Sênior", date(2020, 2, 1)),
    ]
}

pub fn demo_profiles() -> Vec<UserProfile> {
    let profile = |id: &str, name: &str, email: &str, role: UserRole| UserProfile {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
    };
    vec![
        profile("USR-001", "Ana Costa", "ana.costa@multiluz.com", UserRole::Admin),
        profile("USR-002", "Carlos Lima", "carlos.lima@multiluz.com", UserRole::Manager),
        profile("USR-003", "Bruno Gomes", "bruno.gomes@multiluz.com", UserRole::Salesperson),
        profile("USR-004", "Carla Dias", "carla.dias@multiluz.com", UserRole::Salesperson),
        profile("USR-005", "Diego Martins", "diego.martins@multiluz.com", UserRole::Salesperson),
    ]
}

struct OrderSeed {
    id: &'static str,
    customer: &'static str,
    consultant: &'static str,
    insurance: bool,
    value: i64,
    initial_bps: u32,
    down_bps: u32,
    due_offset: i64,
    city: &'static str,
    created: NaiveDate,
    signed: NaiveDate,
    method: &'static str,
    origin: &'static str,
    prospected_by: &'static str,
    cancelled: Option<NaiveDate>,
    status: OrderStatus,
}

impl OrderSeed {
    fn into_order(self, today: NaiveDate) -> Order {
        Order {
            id: self.id.to_string(),
            customer_name: self.customer.to_string(),
            consultant: self.consultant.to_string(),
            insurance: self.insurance,
            order_value: Money::from_reais(self.value),
            initial_payment_percentage: Rate::from_bps(self.initial_bps),
            down_payment_percentage: Rate::from_bps(self.down_bps),
            down_payment_due_date: days_from(today, self.due_offset),
            city: self.city.to_string(),
            contract_creation_date: self.created,
            contract_signature_date: self.signed,
            payment_method: self.method.to_string(),
            origin: self.origin.to_string(),
            prospected_by: self.prospected_by.to_string(),
            cancellation_date: self.cancelled,
            order_status: self.status,
        }
    }
}

/// Demo orders with due dates relative to `today`.
pub fn demo_orders(today: NaiveDate) -> Vec<Order> {
    let seeds = vec![
        OrderSeed {
            id: "ORD-001",
            customer: "Empresa Alpha",
            consultant: "Ana Costa",
            insurance: true,
            value: 25_000,
            initial_bps: 1000,
            down_bps: 2000,
            due_offset: 10,
            city: "São Paulo",
            created: date(2023, 10, 1),
            signed: date(2023, 10, 5),
            method: "Boleto",
            origin: "Indicação",
            prospected_by: "Ana Costa",
            cancelled: None,
            status: OrderStatus::Active,
        },
        OrderSeed {
            id: "ORD-002",
            customer: "Construtora Beta",
            consultant: "Bruno Gomes",
            insurance: false,
            value: 50_000,
            initial_bps: 1500,
            down_bps: 3000,
            due_offset: 0,
            city: "Rio de Janeiro",
            created: date(2023, 10, 3),
            signed: date(2023, 10, 8),
            method: "Transferência",
            origin: "Website",
            prospected_by: "Marketing",
            cancelled: None,
            status: OrderStatus::Active,
        },
        OrderSeed {
            id: "ORD-003",
            customer: "Mercado Gama",
            consultant: "Ana Costa",
            insurance: false,
            value: 15_000,
            initial_bps: 2000,
            down_bps: 5000,
            due_offset: -5,
            city: "Campinas",
            created: date(2023, 10, 5),
            signed: date(2023, 10, 10),
            method: "Pix",
            origin: "Feira",
            prospected_by: "Ana Costa",
            cancelled: None,
            status: OrderStatus::Active,
        },
        OrderSeed {
            id: "ORD-004",
            customer: "Indústria Delta",
            consultant: "Carla Dias",
            insurance: true,
            value: 120_000,
            initial_bps: 1000,
            down_bps: 1000,
            due_offset: -15,
            city: "São Paulo",
            created: date(2023, 9, 15),
            signed: date(2023, 9, 20),
            method: "Cartão de Crédito",
            origin: "Prospecção",
            prospected_by: "Carla Dias",
            cancelled: None,
            status: OrderStatus::Completed,
        },
        OrderSeed {
            id: "ORD-005",
            customer: "Varejo Epsilon",
            consultant: "Diego Martins",
            insurance: false,
            value: 35_000,
            initial_bps: 1000,
            down_bps: 2000,
            due_offset: 5,
            city: "Belo Horizonte",
            created: date(2023, 10, 12),
            signed: date(2023, 10, 15),
            method: "Boleto",
            origin: "Website",
            prospected_by: "Marketing",
            cancelled: Some(date(2023, 10, 20)),
            status: OrderStatus::Cancelled,
        },
        OrderSeed {
            id: "ORD-006",
            customer: "Escola Zeta",
            consultant: "Bruno Gomes",
            insurance: true,
            value: 42_000,
            initial_bps: 1000,
            down_bps: 2500,
            due_offset: -4,
            city: "Niterói",
            created: date(2023, 10, 11),
            signed: date(2023, 10, 14),
            method: "Pix",
            origin: "Indicação",
            prospected_by: "Bruno Gomes",
            cancelled: None,
            status: OrderStatus::Active,
        },
    ];
    seeds.into_iter().map(|s| s.into_order(today)).collect()
}

pub fn demo_payments() -> Vec<Payment> {
    let payment = |id: &str, order_id: &str, paid: NaiveDate, value: i64| Payment {
        id: id.to_string(),
        order_id: order_id.to_string(),
        payment_date: paid,
        value: Money::from_reais(value),
    };
    vec![
        payment("PAY-001", "ORD-001", date(2023, 10, 10), 2_500),
        payment("PAY-002", "ORD-002", date(2023, 10, 12), 7_500),
        payment("PAY-003", "ORD-002", date(2023, 11, 1), 7_500),
        payment("PAY-004", "ORD-004", date(2023, 9, 25), 12_000),
        payment("PAY-005", "ORD-004", date(2023, 10, 25), 108_000),
        payment("PAY-006", "ORD-006", date(2023, 10, 20), 10_500),
    ]
}

pub fn demo_commissions() -> Vec<Commission> {
    let commission = |id: &str, order_id: &str, bps: u32, paid_on: Option<NaiveDate>| Commission {
        id: id.to_string(),
        order_id: order_id.to_string(),
        commission_rate: Rate::from_bps(bps),
        status: if paid_on.is_some() {
            CommissionStatus::Paid
        } else {
            CommissionStatus::Pending
        },
        payment_date: paid_on,
    };
    vec![
        commission("COM-001", "ORD-001", 500, Some(date(2023, 11, 1))),
        commission("COM-002", "ORD-002", 500, None),
        commission("COM-003", "ORD-004", 700, Some(date(2023, 11, 5))),
        commission("COM-004", "ORD-006", 500, None),
    ]
}

/// Builds a store holding the demo data set. New records continue the
/// seeded sequences (`ORD-007`, `PAY-007`, ...).
pub fn demo_store(today: NaiveDate) -> StoreResult<Store> {
    let store = Store::with_config(demo_config());

    for salesperson in demo_salespeople() {
        store.salesperson_table().insert(salesperson)?;
    }
    for profile in demo_profiles() {
        store.profile_table().insert(profile)?;
    }
    for order in demo_orders(today) {
        store.order_table().insert(order)?;
    }
    for payment in demo_payments() {
        store.payment_table().insert(payment)?;
    }
    for commission in demo_commissions() {
        store.commission_table().insert(commission)?;
    }

    info!(
        orders = store.order_table().len(),
        payments = store.payment_table().len(),
        commissions = store.commission_table().len(),
        "Demo data loaded"
    );
    Ok(store)
}
