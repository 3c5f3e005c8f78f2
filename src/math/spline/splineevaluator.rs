// ── splineevaluator.rs ──────────────────────────────────────────────────────

use super::cachebackend::{
    RefCellBackend,
    RwLockBackend,
    SplineCacheBackend,
    time_key
};
use super::knotvector::KnotVector;

/// gamma 與 cross integral 固定在三次（cubic）基底上操作。
const CUBIC_DEGREE: usize = 3;

/// B-spline 基底函數評價器：一個 instance 綁定一組節點向量，
/// 節點建構後不再變動，三張 memo 表因此永遠不需要失效。
///
/// 核心 struct 只寫一次，C 決定執行緒安全性。
pub struct SplineEvaluator<C: SplineCacheBackend> {
    knots: KnotVector,
    backend: C,
}

impl<C: SplineCacheBackend> SplineEvaluator<C> {
    fn new_with_backend(knots: KnotVector, backend: C) -> Self {
        Self { knots, backend }
    }

    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    /// Cox–de Boor 遞迴：階數 `degree` 的基底函數在 `time` 的值，
    /// support 為 `[knot[start], knot[start+degree+1])`（左閉右開）。
    ///
    /// # 重複節點的約定
    ///
    /// 遞迴的兩個分母 `knot[start+degree]-knot[start]` 與
    /// `knot[start+degree+1]-knot[start+1]` 在重複節點下會是 0。
    /// 此時該項整個視為 0（de Boor 遞迴的極限約定），
    /// 讓 clamped knot vector 也能得到良定義的結果。
    ///
    /// 索引越界（`start+degree+1` 超出節點向量）直接 panic，
    /// 合法的索引範圍是呼叫端的責任。
    pub fn basis(&self, start: usize, degree: usize, time: f64) -> f64 {
        let begin = self.knots[start];
        let end = self.knots[start + degree + 1];
        if time < begin || time >= end {
            return 0.0;
        }
        if degree == 0 {
            return 1.0;
        }
        self.backend
            .basis_or_compute((start, degree, time_key(time)), || {
                let left_span = self.knots[start + degree] - begin;
                let right_span = end - self.knots[start + 1];
                let mut value = 0.0;
                if left_span != 0.0 {
                    value += (time - begin) / left_span * self.basis(start, degree - 1, time);
                }
                if right_span != 0.0 {
                    value += (end - time) / right_span * self.basis(start + 1, degree - 1, time);
                }
                value
            })
    }

    /// 基底函數從 support 左端點到 `time` 的 running integral。
    ///
    /// 內部用標準恆等式展開：階數 d 的積分等於一串階數 d+1 基底的
    /// 等權重和，每項權重 `(end-begin)/(d+1)`。`time` 在 support 右端
    /// 之後時直接回傳整段積分值，不再遞迴。
    pub fn integral(&self, start: usize, degree: usize, time: f64) -> f64 {
        let begin = self.knots[start];
        let end = self.knots[start + degree + 1];
        let full_support = (end - begin) / (degree as f64 + 1.0);
        if time < begin {
            return 0.0;
        }
        if time >= end {
            return full_support;
        }
        let mut sum = 0.0;
        let mut index = start;
        while self.knots[index] < time {
            sum += full_support * self.basis(index, degree + 1, time);
            index += 1;
        }
        sum
    }

    /// 基底函數的 `order` 階導數。
    ///
    /// order 0 直接退回 `basis()`（吃得到共用的 memo 表）；
    /// 階數 0 的基底是階梯函數，任何一階以上的導數都視為 0。
    /// 其餘情況將階數與 order 同步降一階遞迴合成，
    /// 分母為 0 的項與 `basis()` 採同一個約定：整項視為 0。
    /// 這一層本身不做快取。
    pub fn derivative(&self, start: usize, degree: usize, time: f64, order: usize) -> f64 {
        if order == 0 {
            return self.basis(start, degree, time);
        }
        if degree == 0 {
            return 0.0;
        }
        let begin = self.knots[start];
        let end = self.knots[start + degree + 1];
        let left_span = self.knots[start + degree] - begin;
        let right_span = end - self.knots[start + 1];
        let mut value = 0.0;
        if left_span != 0.0 {
            value += degree as f64 / left_span * self.derivative(start, degree - 1, time, order - 1);
        }
        if right_span != 0.0 {
            value +=
                degree as f64 / right_span * self.derivative(start + 1, degree - 1, time, order - 1);
        }
        value
    }

    /// 三次基底函數在 `[f_start, f_end]` 上的定積分，
    /// 即 `integral(start, 3, f_end) - integral(start, 3, f_start)`。
    pub fn gamma(&self, start: usize, f_start: f64, f_end: f64) -> f64 {
        self.backend
            .gamma_or_compute((start, time_key(f_start), time_key(f_end)), || {
                self.integral(start, CUBIC_DEGREE, f_end)
                    - self.integral(start, CUBIC_DEGREE, f_start)
            })
    }

    /// 兩條三次基底函數二階導數乘積的積分
    /// `∫_{f_start}^{f_end} B''_{start1}(t) * B''_{start2}(t) dt`，
    /// 平滑化懲罰矩陣的元素就是這個量。
    ///
    /// 三次基底只是 piecewise 多項式，分部積分後的剩餘項必須在每個
    /// 內部節點切開逐段累加，所以先建出
    /// `[f_start] + (介於其間的節點) + [f_end]` 的視窗邊界序列。
    pub fn cross_integral(&self, start1: usize, start2: usize, f_start: f64, f_end: f64) -> f64 {
        self.backend
            .cross_or_compute((start1, start2, time_key(f_start), time_key(f_end)), || {
                let term1 = self.derivative(start1, CUBIC_DEGREE, f_end, 1)
                    * self.derivative(start2, CUBIC_DEGREE, f_end, 2);
                let term2 = self.derivative(start1, CUBIC_DEGREE, f_start, 1)
                    * self.derivative(start2, CUBIC_DEGREE, f_start, 2);

                let mut windows = Vec::with_capacity(self.knots.len() + 2);
                windows.push(f_start);
                windows.extend(self.knots.iter().filter(|&t| f_start < t && t < f_end));
                windows.push(f_end);

                let term3: f64 = windows
                    .windows(2)
                    .map(|pair| {
                        self.derivative(start2, CUBIC_DEGREE, pair[0], 3)
                            * (self.basis(start1, CUBIC_DEGREE, pair[1])
                                - self.basis(start1, CUBIC_DEGREE, pair[0]))
                    })
                    .sum();

                term1 - term2 - term3
            })
    }
}

/// 兩個 convenience constructor，分別對應兩種用途
impl SplineEvaluator<RefCellBackend> {
    pub fn new(knots: KnotVector) -> Self {
        Self::new_with_backend(knots, RefCellBackend::new())
    }
}

impl SplineEvaluator<RwLockBackend> {
    pub fn new_threadsafe(knots: KnotVector) -> Self {
        Self::new_with_backend(knots, RwLockBackend::new())
    }
}

// ── Type alias：對外只暴露這兩個名字 ─────────────────────────────────────────

pub type SingleThreadedSplineEvaluator = SplineEvaluator<RefCellBackend>;
pub type MultiThreadedSplineEvaluator = SplineEvaluator<RwLockBackend>;
