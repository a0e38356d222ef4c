use serde::{Deserialize, Serialize};

/// Days per planning week; day 0 is Monday, day 6 is Sunday.
pub const WEEK_DAYS: usize = 7;
/// Hourly slots per day.
pub const DAY_HOURS: usize = 24;

/// Dense 7×24 grid of non-negative integers.
///
/// Used for the demand forecast (orders per hour), the required-staffing
/// matrix and the coverage matrix. On the wire it is a plain list of 7
/// rows of 24 numbers; the shape is enforced on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct WeekMatrix([[u32; DAY_HOURS]; WEEK_DAYS]);

impl WeekMatrix {
    pub fn zero() -> Self {
        Self([[0; DAY_HOURS]; WEEK_DAYS])
    }

    pub fn get(&self, day: u8, hour: u8) -> u32 {
        self.0[usize::from(day)][usize::from(hour)]
    }

    pub fn set(&mut self, day: u8, hour: u8, value: u32) {
        self.0[usize::from(day)][usize::from(hour)] = value;
    }

    pub fn bump(&mut self, day: u8, hour: u8) {
        self.0[usize::from(day)][usize::from(hour)] += 1;
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|row| row.iter().all(|v| *v == 0))
    }

    /// Iterate every `(day, hour, value)` cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8, u32)> + '_ {
        self.0.iter().enumerate().flat_map(|(day, row)| {
            row.iter()
                .enumerate()
                .map(move |(hour, value)| (day as u8, hour as u8, *value))
        })
    }
}

impl TryFrom<Vec<Vec<u32>>> for WeekMatrix {
    type Error = String;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, Self::Error> {
        if rows.len() != WEEK_DAYS {
            return Err(format!(
                "week matrix must have {} rows, got {}",
                WEEK_DAYS,
                rows.len()
            ));
        }
        let mut grid = [[0u32; DAY_HOURS]; WEEK_DAYS];
        for (day, row) in rows.iter().enumerate() {
            if row.len() != DAY_HOURS {
                return Err(format!(
                    "week matrix row {} must have {} columns, got {}",
                    day,
                    DAY_HOURS,
                    row.len()
                ));
            }
            grid[day].copy_from_slice(row);
        }
        Ok(Self(grid))
    }
}

impl From<WeekMatrix> for Vec<Vec<u32>> {
    fn from(matrix: WeekMatrix) -> Self {
        matrix.0.iter().map(|row| row.to_vec()).collect()
    }
}

/// Staffing floor per slot: `ceil(demand / productivity_rate)` where demand
/// is positive, zero elsewhere. `productivity_rate` must be >= 1.
pub fn required_matrix(demand: &WeekMatrix, productivity_rate: u32) -> WeekMatrix {
    let mut required = WeekMatrix::zero();
    for (day, hour, orders) in demand.cells() {
        if orders > 0 {
            required.set(day, hour, orders.div_ceil(productivity_rate));
        }
    }
    required
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_shapes() {
        let short: Result<WeekMatrix, _> = vec![vec![0u32; DAY_HOURS]; 6].try_into();
        assert!(short.is_err());

        let mut ragged = vec![vec![0u32; DAY_HOURS]; WEEK_DAYS];
        ragged[3] = vec![0; 23];
        let ragged: Result<WeekMatrix, _> = ragged.try_into();
        assert!(ragged.is_err());
    }

    #[test]
    fn serde_round_trip() {
        let mut matrix = WeekMatrix::zero();
        matrix.set(2, 14, 37);
        let json = serde_json::to_string(&matrix).expect("serialize");
        let back: WeekMatrix = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, matrix);
        assert_eq!(back.get(2, 14), 37);
    }

    #[test]
    fn required_rounds_up_and_keeps_zeros() {
        let mut demand = WeekMatrix::zero();
        demand.set(0, 9, 12);
        demand.set(0, 10, 13);
        demand.set(6, 23, 1);
        let required = required_matrix(&demand, 12);
        assert_eq!(required.get(0, 9), 1);
        assert_eq!(required.get(0, 10), 2);
        assert_eq!(required.get(6, 23), 1);
        assert_eq!(required.get(0, 11), 0);
    }
}
