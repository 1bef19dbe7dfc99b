//! Arquivo: klib/list/ring.rs
//!
//! Propósito: Anel circular duplamente encadeado com um ponteiro ("hand").
//!
//! Detalhes de Implementação:
//! - Os nós vivem numa arena (`Vec`); `next`/`prev` são índices, não ponteiros.
//! - Slots liberados são reaproveitados via free-list.
//! - Inserção antes de um nó e remoção por `NodeId` são O(1).
//! - Invariante: o anel está vazio (sem hand) ou é circular e o hand aponta
//!   para um membro.

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

/// Referência direta a um nó do anel (índice na arena).
///
/// Depois de `Ring::remove` o id fica inválido; o slot pode ser reutilizado
/// por uma inserção futura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

struct Node<T> {
    value: Option<T>,
    next: usize,
    prev: usize,
}

pub struct Ring<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    hand: Option<usize>,
    len: usize,
}

impl<T> Ring<T> {
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            hand: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Nó sob o ponteiro (próximo a ser examinado)
    pub fn hand(&self) -> Option<NodeId> {
        self.hand.map(NodeId)
    }

    /// Move o ponteiro para `id`.
    ///
    /// # Panics
    /// Se `id` não é membro do anel.
    pub fn set_hand(&mut self, id: NodeId) {
        self.assert_member(id);
        self.hand = Some(id.0);
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.0)
            .map_or(false, |node| node.value.is_some())
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0).and_then(|node| node.value.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.0).and_then(|node| node.value.as_mut())
    }

    /// Sucessor de `id` na ordem do anel
    pub fn next(&self, id: NodeId) -> NodeId {
        self.assert_member(id);
        NodeId(self.nodes[id.0].next)
    }

    /// Predecessor de `id` na ordem do anel
    pub fn prev(&self, id: NodeId) -> NodeId {
        self.assert_member(id);
        NodeId(self.nodes[id.0].prev)
    }

    /// Insere `value` imediatamente antes do ponteiro, ou seja, no fim da
    /// volta que começa no hand. Num anel vazio o novo nó vira o hand.
    pub fn push(&mut self, value: T) -> NodeId {
        match self.hand {
            Some(hand) => self.insert_before(NodeId(hand), value),
            None => {
                let idx = self.alloc(value);
                self.hand = Some(idx);
                self.len = 1;
                NodeId(idx)
            }
        }
    }

    /// Insere `value` imediatamente antes de `at`.
    ///
    /// # Panics
    /// Se `at` não é membro do anel.
    pub fn insert_before(&mut self, at: NodeId, value: T) -> NodeId {
        self.assert_member(at);

        let prev = self.nodes[at.0].prev;
        let idx = self.alloc(value);

        self.nodes[idx].next = at.0;
        self.nodes[idx].prev = prev;
        self.nodes[prev].next = idx;
        self.nodes[at.0].prev = idx;
        self.len += 1;

        NodeId(idx)
    }

    /// Remove o nó `id` e devolve o seu valor. Se `id` era o hand, o hand
    /// avança para o sucessor (ou some, se o anel ficou vazio).
    ///
    /// # Panics
    /// Se `id` não é membro do anel.
    pub fn remove(&mut self, id: NodeId) -> T {
        self.assert_member(id);

        let next = self.nodes[id.0].next;
        let prev = self.nodes[id.0].prev;
        if self.len == 1 {
            self.hand = None;
        } else {
            self.nodes[prev].next = next;
            self.nodes[next].prev = prev;
            if self.hand == Some(id.0) {
                self.hand = Some(next);
            }
        }

        self.len -= 1;
        self.free.push(id.0);

        match self.nodes[id.0].value.take() {
            Some(value) => value,
            None => unreachable!("membro do anel sem valor"),
        }
    }

    /// Percorre uma volta completa a partir do hand
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            cursor: self.hand,
            remaining: self.len,
        }
    }

    /// Verifica o invariante de forma: vazio sem hand, ou circular com o
    /// hand membro, `prev` coerente com `next` e exatamente `len` nós
    /// alcançáveis antes de voltar ao início.
    pub fn is_circular(&self) -> bool {
        let Some(start) = self.hand else {
            return self.len == 0;
        };
        if !self.contains(NodeId(start)) {
            return false;
        }

        let mut cursor = start;
        for step in 0..self.len {
            let node = &self.nodes[cursor];
            if node.value.is_none() || self.nodes[node.next].prev != cursor {
                return false;
            }
            cursor = node.next;
            if cursor == start && step + 1 != self.len {
                return false;
            }
        }

        cursor == start
    }

    fn alloc(&mut self, value: T) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Node {
                    value: Some(value),
                    next: idx,
                    prev: idx,
                };
                idx
            }
            None => {
                let idx = self.nodes.len();
                self.nodes.push(Node {
                    value: Some(value),
                    next: idx,
                    prev: idx,
                });
                idx
            }
        }
    }

    #[inline]
    fn assert_member(&self, id: NodeId) {
        assert!(self.contains(id), "NodeId {} não pertence ao anel", id.0);
    }
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Ring<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("NodeId {} não pertence ao anel", id.0),
        }
    }
}

impl<T> IndexMut<NodeId> for Ring<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("NodeId {} não pertence ao anel", id.0),
        }
    }
}

/// Iterador de uma volta, começando no hand
pub struct Iter<'a, T> {
    ring: &'a Ring<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.cursor?;
        let node = &self.ring.nodes[idx];
        self.cursor = Some(node.next);
        self.remaining -= 1;
        node.value.as_ref().map(|value| (NodeId(idx), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
