// ── cachebackend.rs ─────────────────────────────────────────────────────────

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

/// Memo key：(起始節點索引, 階數, 時間)
pub type BasisKey = (usize, usize, u64);
/// Memo key：(起始節點索引, 積分下界, 積分上界)
pub type GammaKey = (usize, u64, u64);
/// Memo key：(第一條基底索引, 第二條基底索引, 積分下界, 積分上界)
pub type CrossKey = (usize, usize, u64, u64);

/// # Cache key 設計：`f64::to_bits()`（u64）
///
/// `f64` 沒有 `Eq`/`Hash`，不能直接當 `HashMap` 的 key。這裡取 bit pattern：
/// 同一個 bit pattern 必定對應同一個計算結果，而數值相等但 bit 不同的輸入
/// （例如 `0.0` 與 `-0.0`，或不同運算路徑得到的同值）會各自佔一個 entry。
/// 代價只是多算一次再覆寫相同的值，不影響正確性。
pub fn time_key(time: f64) -> u64 {
    time.to_bits()
}

/// 抽象快取行為：三張 memo 表（基底、gamma、cross integral）都由 backend 持有，
/// 查詢不到就呼叫 `compute` 算出並存入。
pub trait SplineCacheBackend {
    fn basis_or_compute(&self, key: BasisKey, compute: impl FnOnce() -> f64) -> f64;

    fn gamma_or_compute(&self, key: GammaKey, compute: impl FnOnce() -> f64) -> f64;

    fn cross_or_compute(&self, key: CrossKey, compute: impl FnOnce() -> f64) -> f64;
}

// ── 單執行緒版：RefCell ──────────────────────────────────────────────────────
//
// 注意：`compute` 會遞迴地重入同一張表（Cox–de Boor 遞迴在計算途中查詢
// 低階的 entry），所以查詢的 borrow 必須在呼叫 `compute` 之前釋放，
// 不能用 `entry().or_insert_with()` 一路持著 borrow。

pub struct RefCellBackend {
    basis: RefCell<HashMap<BasisKey, f64>>,
    gamma: RefCell<HashMap<GammaKey, f64>>,
    cross: RefCell<HashMap<CrossKey, f64>>,
}

impl RefCellBackend {
    pub fn new() -> Self {
        Self {
            basis: RefCell::new(HashMap::new()),
            gamma: RefCell::new(HashMap::new()),
            cross: RefCell::new(HashMap::new()),
        }
    }

    fn get_or_compute<K>(
        cell: &RefCell<HashMap<K, f64>>,
        key: K,
        compute: impl FnOnce() -> f64,
    ) -> f64
    where
        K: Copy + Eq + Hash,
    {
        if let Some(&value) = cell.borrow().get(&key) {
            return value;
        }
        let value = compute();
        cell.borrow_mut().insert(key, value);
        value
    }
}

impl SplineCacheBackend for RefCellBackend {
    fn basis_or_compute(&self, key: BasisKey, compute: impl FnOnce() -> f64) -> f64 {
        Self::get_or_compute(&self.basis, key, compute)
    }

    fn gamma_or_compute(&self, key: GammaKey, compute: impl FnOnce() -> f64) -> f64 {
        Self::get_or_compute(&self.gamma, key, compute)
    }

    fn cross_or_compute(&self, key: CrossKey, compute: impl FnOnce() -> f64) -> f64 {
        Self::get_or_compute(&self.cross, key, compute)
    }
}

// ── 多執行緒版：RwLock ───────────────────────────────────────────────────────
//
// # 已知 trade-off：double-compute
//
// 讀鎖查詢與寫鎖寫入之間，兩條執行緒可能都發現 key 不存在，分別計算後
// 先後寫入。同一組 key 的結果具確定性，雙重計算只是浪費而非錯誤；
// 換來的是 `compute` 不持鎖，遞迴重入同一張表時不會自我死鎖。

pub struct RwLockBackend {
    basis: RwLock<HashMap<BasisKey, f64>>,
    gamma: RwLock<HashMap<GammaKey, f64>>,
    cross: RwLock<HashMap<CrossKey, f64>>,
}

impl RwLockBackend {
    pub fn new() -> Self {
        Self {
            basis: RwLock::new(HashMap::new()),
            gamma: RwLock::new(HashMap::new()),
            cross: RwLock::new(HashMap::new()),
        }
    }

    fn get_or_compute<K>(
        lock: &RwLock<HashMap<K, f64>>,
        key: K,
        compute: impl FnOnce() -> f64,
    ) -> f64
    where
        K: Copy + Eq + Hash,
    {
        if let Some(&value) = lock.read().unwrap().get(&key) {
            return value;
        }
        let value = compute();
        lock.write().unwrap().insert(key, value);
        value
    }
}

impl SplineCacheBackend for RwLockBackend {
    fn basis_or_compute(&self, key: BasisKey, compute: impl FnOnce() -> f64) -> f64 {
        Self::get_or_compute(&self.basis, key, compute)
    }

    fn gamma_or_compute(&self, key: GammaKey, compute: impl FnOnce() -> f64) -> f64 {
        Self::get_or_compute(&self.gamma, key, compute)
    }

    fn cross_or_compute(&self, key: CrossKey, compute: impl FnOnce() -> f64) -> f64 {
        Self::get_or_compute(&self.cross, key, compute)
    }
}
